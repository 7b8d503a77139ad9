//! Out-of-process video transcoding with the logo/caption filter graph.

use crate::assets;
use crate::error::OverlayError;
use crate::overlay::PADDING;
use async_trait::async_trait;
use regex::Regex;
use std::io;
use std::path::Path;
use std::process::Output;
use std::sync::LazyLock;
use tokio::process::Command as TokioCommand;
use tracing::info;

/// Caption drawn onto every frame.
pub const CAPTION: &str = "Co-branded Video";

const CAPTION_FONT_SIZE: u32 = 24;

// Trait seam so the handler can be exercised without an ffmpeg on PATH.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait TranscodeRunner: Send + Sync {
    async fn run_overlay(
        &self,
        input: &Path,
        logo: &Path,
        filter_graph: &str,
        output: &Path,
    ) -> io::Result<Output>;
}

pub struct FfmpegRunner;

#[async_trait]
impl TranscodeRunner for FfmpegRunner {
    async fn run_overlay(
        &self,
        input: &Path,
        logo: &Path,
        filter_graph: &str,
        output: &Path,
    ) -> io::Result<Output> {
        let mut command = TokioCommand::new("ffmpeg");
        command.arg("-y");
        command.arg("-i").arg(input);
        command.arg("-i").arg(logo);
        command.arg("-filter_complex").arg(filter_graph);
        command.arg("-codec:a").arg("copy");
        command.arg(output);
        command.output().await
    }
}

// drawtext assigns special meaning to backslash, quote, colon and percent;
// anything outside this allowlist is dropped before the caption enters the
// filter graph.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9 .,!-]").expect("caption allowlist regex"));

fn sanitize_caption(text: &str) -> String {
    DISALLOWED.replace_all(text, "").into_owned()
}

/// Filter graph applied to every frame: logo pinned just inside the
/// bottom-right corner, caption drawn top-left. The audio stream is copied
/// unmodified by the surrounding invocation.
fn filter_graph(caption: &str) -> String {
    format!(
        "[0:v][1:v] overlay=W-w-{pad}:H-h-{pad}, \
         drawtext=text='{text}':x={pad}:y={pad}:fontsize={size}:fontcolor=white",
        pad = PADDING,
        text = sanitize_caption(caption),
        size = CAPTION_FONT_SIZE,
    )
}

/// Run the full video transformation: input existence check, out-of-process
/// transcode, output verification.
///
/// The transcoder has been seen exiting 0 without writing anything, so the
/// output file is verified on disk rather than trusting the exit code.
pub async fn overlay_video(
    runner: &dyn TranscodeRunner,
    input: &Path,
    logo: &Path,
    output: &Path,
) -> Result<(), OverlayError> {
    assets::require_input(input)?;
    assets::ensure_parent_dir(output).await?;

    let graph = filter_graph(CAPTION);
    info!(
        input = %input.display(),
        output = %output.display(),
        filter = %graph,
        "starting transcode"
    );

    let done = runner.run_overlay(input, logo, &graph, output).await?;
    if !done.status.success() {
        return Err(OverlayError::Transcode {
            status: done.status,
            stderr: String::from_utf8_lossy(&done.stderr).into_owned(),
        });
    }

    if !output.exists() {
        return Err(OverlayError::OutputMissing(output.to_path_buf()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;
    use tempfile::tempdir;

    fn process_output(code: i32) -> Output {
        Output {
            status: ExitStatus::from_raw(code << 8),
            stdout: Vec::new(),
            stderr: b"ffmpeg diagnostics".to_vec(),
        }
    }

    #[test]
    fn filter_graph_matches_the_fixed_overlay() {
        assert_eq!(
            filter_graph(CAPTION),
            "[0:v][1:v] overlay=W-w-10:H-h-10, \
             drawtext=text='Co-branded Video':x=10:y=10:fontsize=24:fontcolor=white"
        );
    }

    #[test]
    fn captions_are_stripped_of_filter_metacharacters() {
        assert_eq!(sanitize_caption("Co-branded Video"), "Co-branded Video");
        assert_eq!(
            sanitize_caption(r"evil':x=0,drawtext=%{pts}\"),
            "evilx0,drawtextpts"
        );
    }

    #[tokio::test]
    async fn missing_input_rejects_without_invoking_the_transcoder() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input-video.mp4");
        let logo = dir.path().join("logo.png");
        let output = dir.path().join("output-video.mp4");

        // no expectations: any invocation panics
        let runner = MockTranscodeRunner::new();

        let err = overlay_video(&runner, &input, &logo, &output)
            .await
            .unwrap_err();
        assert!(matches!(err, OverlayError::InputMissing(_)));
    }

    #[tokio::test]
    async fn nonzero_exit_maps_to_a_transcode_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input-video.mp4");
        std::fs::write(&input, b"container bytes").unwrap();
        let logo = dir.path().join("logo.png");
        let output = dir.path().join("output-video.mp4");

        let mut runner = MockTranscodeRunner::new();
        runner
            .expect_run_overlay()
            .times(1)
            .returning(|_, _, _, _| Box::pin(async { Ok(process_output(1)) }));

        let err = overlay_video(&runner, &input, &logo, &output)
            .await
            .unwrap_err();
        match err {
            OverlayError::Transcode { status, stderr } => {
                assert_eq!(status.code(), Some(1));
                assert!(stderr.contains("ffmpeg diagnostics"));
            }
            other => panic!("expected Transcode, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn zero_exit_without_an_output_file_is_still_a_failure() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input-video.mp4");
        std::fs::write(&input, b"container bytes").unwrap();
        let logo = dir.path().join("logo.png");
        let output = dir.path().join("output-video.mp4");

        let mut runner = MockTranscodeRunner::new();
        runner
            .expect_run_overlay()
            .times(1)
            .returning(|_, _, _, _| Box::pin(async { Ok(process_output(0)) }));

        let err = overlay_video(&runner, &input, &logo, &output)
            .await
            .unwrap_err();
        assert!(matches!(err, OverlayError::OutputMissing(_)));
    }

    #[tokio::test]
    async fn successful_transcode_leaves_the_output_in_place() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input-video.mp4");
        std::fs::write(&input, b"container bytes").unwrap();
        let logo = dir.path().join("logo.png");
        let output = dir.path().join("uploads/output-video.mp4");

        let mut runner = MockTranscodeRunner::new();
        runner
            .expect_run_overlay()
            .withf(|_, _, filter, _| filter.contains("drawtext") && filter.contains("overlay"))
            .times(1)
            .returning(|_, _, _, output| {
                std::fs::write(output, b"transcoded bytes").unwrap();
                Box::pin(async { Ok(process_output(0)) })
            });

        overlay_video(&runner, &input, &logo, &output)
            .await
            .unwrap();

        assert!(output.exists());
        assert!(output.metadata().unwrap().len() > 0);
    }
}

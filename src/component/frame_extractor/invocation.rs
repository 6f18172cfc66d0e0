use crate::config::FrameExtractorSettings;
use crate::error::{ReviewError, Result};
use crate::tools::{screenshot_path, to_seek_time};
use std::path::{Path, PathBuf};
use std::process::Command;

/// 截圖的最早位置（毫秒），位置必須大於此值
pub const MIN_SCREENSHOT_POSITION_MS: u64 = 1000;

/// 一次截圖所需的外部程式呼叫
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSpec {
    pub program: String,
    pub seek_time: String,
    pub video_path: PathBuf,
    pub quality: u8,
    pub output_path: PathBuf,
}

impl InvocationSpec {
    /// 呼叫參數，輸出檔已存在時直接覆寫
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-ss".to_string(),
            self.seek_time.clone(),
            "-i".to_string(),
            self.video_path.to_string_lossy().to_string(),
            "-vframes".to_string(),
            "1".to_string(),
            "-q:v".to_string(),
            self.quality.to_string(),
            self.output_path.to_string_lossy().to_string(),
        ]
    }

    #[must_use]
    pub fn to_command(&self) -> Command {
        let quality = self.quality.to_string();
        let mut cmd = Command::new(&self.program);
        cmd.args(["-y", "-ss", self.seek_time.as_str(), "-i"])
            .arg(&self.video_path)
            .args(["-vframes", "1", "-q:v", quality.as_str()])
            .arg(&self.output_path);
        cmd
    }

    /// 記錄用的完整指令列
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// 建立目前播放位置的截圖請求
///
/// 位置不超過 1000 ms 時拒絕，輸出路徑為影片路徑加上 `.jpg`。
pub fn request_screenshot(
    video_path: &Path,
    position_ms: u64,
    settings: &FrameExtractorSettings,
) -> Result<InvocationSpec> {
    if position_ms <= MIN_SCREENSHOT_POSITION_MS {
        return Err(ReviewError::PositionTooEarly(position_ms));
    }

    Ok(InvocationSpec {
        program: settings.program.clone(),
        seek_time: to_seek_time(position_ms),
        video_path: video_path.to_path_buf(),
        quality: settings.quality,
        output_path: screenshot_path(video_path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_screenshot_too_early() {
        let settings = FrameExtractorSettings::default();
        let video = Path::new("/v/movie.mp4");

        for position in [0, 500, 1000] {
            assert!(matches!(
                request_screenshot(video, position, &settings),
                Err(ReviewError::PositionTooEarly(p)) if p == position
            ));
        }
        assert!(request_screenshot(video, 1001, &settings).is_ok());
    }

    #[test]
    fn test_request_screenshot_arguments() {
        let settings = FrameExtractorSettings::default();
        let video = Path::new("/v/movie.mp4");

        let spec = request_screenshot(video, 5000, &settings).unwrap();

        assert_eq!(spec.seek_time, to_seek_time(5000));
        assert_eq!(spec.output_path, screenshot_path(video));
        assert_eq!(
            spec.args(),
            vec![
                "-y",
                "-ss",
                "5.000",
                "-i",
                "/v/movie.mp4",
                "-vframes",
                "1",
                "-q:v",
                "2",
                "/v/movie.mp4.jpg",
            ]
        );
        assert_eq!(
            spec.command_line(),
            "ffmpeg -y -ss 5.000 -i /v/movie.mp4 -vframes 1 -q:v 2 /v/movie.mp4.jpg"
        );
    }

    #[test]
    fn test_to_command_matches_args() {
        let settings = FrameExtractorSettings {
            program: "/usr/local/bin/ffmpeg".to_string(),
            quality: 4,
        };
        let spec = request_screenshot(Path::new("/v/a b.mp4"), 61_234, &settings).unwrap();
        let cmd = spec.to_command();

        assert_eq!(cmd.get_program(), "/usr/local/bin/ffmpeg");
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        assert_eq!(args, spec.args());
        assert_eq!(args[2], "61.234");
        assert_eq!(args[8], "4");
    }
}

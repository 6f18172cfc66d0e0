use super::invocation::InvocationSpec;
use crate::error::{ReviewError, Result};
use log::{debug, info, warn};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStatus {
    Running,
    Succeeded,
    /// 結束代碼（被訊號中止時為 `None`）
    Failed(Option<i32>),
}

/// 已啟動的截圖程序
///
/// 啟動後不會等待完成；需要知道結果的呼叫端可以自行輪詢。
#[derive(Debug)]
pub struct ExtractionHandle {
    child: Child,
    spec: InvocationSpec,
    started: Instant,
}

/// 在背景啟動截圖程式，不等待結束
///
/// 標準輸出與標準錯誤各由一個執行緒逐行讀出寫入 debug 日誌。
pub fn spawn_extraction(spec: &InvocationSpec) -> Result<ExtractionHandle> {
    let mut command = spec.to_command();
    command.stdin(Stdio::null());
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|e| ReviewError::SpawnFailed {
        program: spec.program.clone(),
        source: e,
    })?;

    info!("啟動截圖程序 [{}]: {}", child.id(), spec.command_line());

    let pid = child.id();
    if let Some(stdout) = child.stdout.take() {
        spawn_output_reader(stdout, pid, "stdout");
    }
    if let Some(stderr) = child.stderr.take() {
        spawn_output_reader(stderr, pid, "stderr");
    }

    Ok(ExtractionHandle {
        child,
        spec: spec.clone(),
        started: Instant::now(),
    })
}

fn spawn_output_reader<R>(stream: R, pid: u32, label: &'static str)
where
    R: Read + Send + 'static,
{
    let mut reader = BufReader::new(stream);
    thread::spawn(move || {
        let mut line = String::new();
        while let Ok(bytes) = reader.read_line(&mut line) {
            if bytes == 0 {
                break;
            }
            let content = line.trim_end();
            if !content.is_empty() {
                debug!("截圖程序 [{pid}] {label}: {content}");
            }
            line.clear();
        }
    });
}

impl ExtractionHandle {
    #[must_use]
    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.spec.output_path
    }

    #[must_use]
    pub const fn spec(&self) -> &InvocationSpec {
        &self.spec
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// 不阻塞地查詢程序狀態
    pub fn try_status(&mut self) -> ExtractionStatus {
        match self.child.try_wait() {
            Ok(Some(status)) => self.finished(status),
            Ok(None) => ExtractionStatus::Running,
            Err(e) => {
                warn!("無法檢查截圖程序狀態 [{}]: {e}", self.pid());
                ExtractionStatus::Failed(None)
            }
        }
    }

    /// 等待程序結束
    pub fn wait(&mut self) -> ExtractionStatus {
        match self.child.wait() {
            Ok(status) => self.finished(status),
            Err(e) => {
                warn!("等待截圖程序失敗 [{}]: {e}", self.pid());
                ExtractionStatus::Failed(None)
            }
        }
    }

    fn finished(&self, status: ExitStatus) -> ExtractionStatus {
        if status.success() {
            debug!(
                "截圖程序 [{}] 完成 ({:.1}s): {}",
                self.pid(),
                self.elapsed().as_secs_f64(),
                self.output_path().display()
            );
            ExtractionStatus::Succeeded
        } else {
            ExtractionStatus::Failed(status.code())
        }
    }
}

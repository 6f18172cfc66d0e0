use crate::component::VideoReviewer;
use crate::config::{Config, add_recent_video, save_settings};
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use log::warn;
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub fn run_video_reviewer(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let reviewer = VideoReviewer::new(config.clone(), Arc::clone(shutdown_signal));

    let video = match reviewer.choose_video() {
        Ok(Some(video)) => video,
        Ok(None) => return Ok(()),
        Err(e) => {
            eprintln!("{} {e:#}", style(t!("common.error_prefix")).red().bold());
            pause(term)?;
            return Ok(());
        }
    };

    add_recent_video(&mut config.settings, &video);
    if let Err(e) = save_settings(config) {
        warn!("無法儲存最近開啟的影片: {e:#}");
    }

    // 上一次審閱時按下的 Ctrl-C 不影響這一次
    shutdown_signal.store(false, Ordering::SeqCst);

    if let Err(e) = reviewer.run(&video) {
        eprintln!("{} {e:#}", style(t!("common.error_prefix")).red().bold());
        pause(term)?;
    }

    Ok(())
}

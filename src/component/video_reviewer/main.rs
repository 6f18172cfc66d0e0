use super::session::ReviewSession;
use crate::component::frame_extractor::ExtractionStatus;
use crate::component::sidecar_store::parse_release_date;
use crate::config::Config;
use crate::tools::{
    format_clock, parse_clock, scan_video_files, validate_directory_exists, validate_video_file,
};
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Editor, Input, Select};
use log::{info, warn};
use rust_i18n::t;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 影片審閱器：選擇影片後編輯描述資料、場景標記並截圖
pub struct VideoReviewer {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
    term: Term,
}

impl VideoReviewer {
    pub fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
            term: Term::stdout(),
        }
    }

    /// 選擇要開啟的影片（最近開啟、瀏覽資料夾或直接輸入路徑）
    pub fn choose_video(&self) -> Result<Option<PathBuf>> {
        self.term.clear_screen()?;
        println!("{}", style(t!("reviewer.open.title")).cyan().bold());
        println!("{}", style(t!("common.esc_hint")).dim());

        let recent: Vec<&PathBuf> = self
            .config
            .settings
            .recent_videos
            .iter()
            .filter(|p| p.is_file())
            .collect();

        let mut items: Vec<String> = recent
            .iter()
            .map(|p| t!("reviewer.open.recent_item", path = p.display()).to_string())
            .collect();
        items.push(t!("reviewer.open.browse").to_string());
        items.push(t!("reviewer.open.enter_path").to_string());
        items.push(t!("common.back").to_string());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("reviewer.open.prompt"))
            .items(&items)
            .default(0)
            .interact_on_opt(&self.term)?;

        match selection {
            Some(i) if i < recent.len() => Ok(Some(recent[i].clone())),
            Some(i) if i == recent.len() => self.browse_folder(),
            Some(i) if i == recent.len() + 1 => self.prompt_video_path().map(Some),
            _ => Ok(None),
        }
    }

    fn default_directory(&self) -> PathBuf {
        self.config
            .settings
            .last_directory
            .clone()
            .filter(|p| p.is_dir())
            .or_else(dirs::video_dir)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn browse_folder(&self) -> Result<Option<PathBuf>> {
        let input: String = Input::new()
            .with_prompt(t!("reviewer.open.folder_prompt"))
            .default(self.default_directory().display().to_string())
            .interact_text()?;
        let directory = PathBuf::from(input.trim());
        validate_directory_exists(&directory)?;

        let videos = scan_video_files(&directory)?;
        if videos.is_empty() {
            println!("{}", style(t!("reviewer.open.no_videos")).yellow());
            crate::pause(&self.term)?;
            return Ok(None);
        }

        let items: Vec<String> = videos
            .iter()
            .map(|video| {
                let mark = if video.has_sidecar { "✓" } else { " " };
                let size_mb = video.size as f64 / 1024.0 / 1024.0;
                format!(
                    "{mark} {} ({size_mb:.2} MB)",
                    video.path.file_name().unwrap_or_default().to_string_lossy()
                )
            })
            .collect();

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("reviewer.open.pick_video"))
            .items(&items)
            .default(0)
            .max_length(15)
            .interact_on_opt(&self.term)?;

        Ok(selection.map(|i| videos[i].path.clone()))
    }

    fn prompt_video_path(&self) -> Result<PathBuf> {
        let path: String = Input::new()
            .with_prompt(t!("reviewer.open.path_prompt"))
            .interact_text()?;
        let path = PathBuf::from(path.trim());
        validate_video_file(&path)?;
        Ok(path)
    }

    pub fn run(&self, video_path: &Path) -> Result<()> {
        let mut session =
            ReviewSession::open(video_path, self.config.settings.frame_extractor.clone())?;
        let mut notice: Option<String> = None;

        loop {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                println!("{}", style(t!("common.cancelled")).yellow());
                break;
            }

            let finished = session.poll_extractions();

            self.term.clear_screen()?;
            self.render(&session);
            for done in finished {
                let path = done.output_path.display();
                match done.status {
                    ExtractionStatus::Succeeded => println!(
                        "{}",
                        style(t!("reviewer.screenshot.done", path = path)).green()
                    ),
                    _ => println!(
                        "{}",
                        style(t!("reviewer.screenshot.failed", path = path)).red()
                    ),
                }
            }
            if let Some(message) = notice.take() {
                println!("{message}");
            }
            println!();

            let actions = vec![
                t!("reviewer.action.set_position"),
                t!("reviewer.action.add_scene"),
                t!("reviewer.action.jump_scene"),
                t!("reviewer.action.delete_scene"),
                t!("reviewer.action.save_scenes"),
                t!("reviewer.action.screenshot"),
                t!("reviewer.action.edit_metadata"),
                t!("reviewer.action.save_metadata"),
                t!("common.back"),
            ];

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(t!("reviewer.prompt"))
                .items(&actions)
                .default(0)
                .interact_on_opt(&self.term)?;

            let result = match selection {
                Some(0) => self.set_position(&mut session),
                Some(1) => {
                    session.add_scene_at_current();
                    Ok(t!(
                        "reviewer.scene.added",
                        position = format_clock(session.position_ms())
                    )
                    .to_string())
                }
                Some(2) => self.jump_to_scene(&mut session),
                Some(3) => self.delete_scene(&mut session),
                Some(4) => session
                    .save_scenes()
                    .map(|()| t!("reviewer.scene.saved").to_string())
                    .map_err(Into::into),
                Some(5) => session
                    .request_screenshot()
                    .map(|path| t!("reviewer.screenshot.requested", path = path.display()).to_string())
                    .map_err(Into::into),
                Some(6) => self.edit_metadata(&mut session),
                Some(7) => session
                    .save_metadata()
                    .map(|()| t!("reviewer.metadata.saved").to_string())
                    .map_err(Into::into),
                Some(8) | None => {
                    if self.confirm_leave(&mut session)? {
                        break;
                    }
                    continue;
                }
                _ => unreachable!(),
            };

            notice = Some(match result {
                Ok(message) => style(message).green().to_string(),
                Err(e) => {
                    warn!("{e:#}");
                    style(format!("{} {e:#}", t!("common.error_prefix")))
                        .red()
                        .to_string()
                }
            });
        }

        session.poll_extractions();
        let released = session.release_extractions();
        if released > 0 {
            info!("仍有 {released} 個截圖程序在背景執行");
        }

        Ok(())
    }

    fn render(&self, session: &ReviewSession) {
        let metadata = session.metadata();

        println!("{}", style(t!("reviewer.title")).cyan().bold());
        println!(
            "{} {}",
            style(t!("reviewer.label.file")).dim(),
            session.video_path().display()
        );
        let sidecar_state = if session.has_sidecar() {
            t!("reviewer.sidecar.present")
        } else {
            t!("reviewer.sidecar.missing")
        };
        println!("{} {}", style(t!("reviewer.label.sidecar")).dim(), sidecar_state);
        if !metadata.title.is_empty() {
            println!(
                "{} {}",
                style(t!("reviewer.label.title")).dim(),
                style(&metadata.title).bold()
            );
        }

        let duration = session
            .duration_ms()
            .map_or_else(|| "--:--:--.---".to_string(), format_clock);
        println!(
            "{} {} / {}",
            style(t!("reviewer.label.position")).dim(),
            format_clock(session.position_ms()),
            duration
        );

        if let Some((width, height)) = session.resolution() {
            println!(
                "{} {width}x{height}",
                style(t!("reviewer.label.resolution")).dim()
            );
        }

        if session.pending_extractions() > 0 {
            println!(
                "{}",
                style(t!(
                    "reviewer.screenshot.pending",
                    count = session.pending_extractions()
                ))
                .dim()
            );
        }
        if session.has_unsaved_changes() {
            println!("{}", style(t!("reviewer.unsaved")).yellow());
        }

        println!();
        if session.scenes().is_empty() {
            println!("{}", style(t!("reviewer.scene.none")).dim());
        } else {
            println!(
                "{}",
                style(t!("reviewer.scene.header", count = session.scenes().len())).bold()
            );
            for (index, marker) in session.scenes().markers().iter().enumerate() {
                println!("  {}. {}", index + 1, format_clock(marker.position_ms));
            }
        }
    }

    fn set_position(&self, session: &mut ReviewSession) -> Result<String> {
        let input: String = Input::new()
            .with_prompt(t!("reviewer.position_prompt"))
            .default(format_clock(session.position_ms()))
            .validate_with(|value: &String| -> Result<(), String> {
                parse_clock(value)
                    .map(|_| ())
                    .ok_or_else(|| t!("reviewer.invalid_position").to_string())
            })
            .interact_text()?;

        let requested = parse_clock(&input).unwrap_or_default();
        let position = session.set_position(requested);
        Ok(t!("reviewer.position_set", position = format_clock(position)).to_string())
    }

    /// 選擇場景，回傳 0 起算的索引
    fn pick_scene(&self, session: &ReviewSession, prompt: &str) -> Result<Option<usize>> {
        if session.scenes().is_empty() {
            return Ok(None);
        }

        let items: Vec<String> = session
            .scenes()
            .markers()
            .iter()
            .enumerate()
            .map(|(index, marker)| format!("{}. {}", index + 1, format_clock(marker.position_ms)))
            .collect();

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .max_length(15)
            .interact_on_opt(&self.term)?;
        Ok(selection)
    }

    fn jump_to_scene(&self, session: &mut ReviewSession) -> Result<String> {
        let Some(index) = self.pick_scene(session, &t!("reviewer.scene.jump_prompt"))? else {
            return Ok(t!("reviewer.scene.none").to_string());
        };
        let position = session.jump_to_scene(index)?;
        Ok(t!("reviewer.position_set", position = format_clock(position)).to_string())
    }

    fn delete_scene(&self, session: &mut ReviewSession) -> Result<String> {
        let Some(index) = self.pick_scene(session, &t!("reviewer.scene.delete_prompt"))? else {
            return Ok(t!("reviewer.scene.none").to_string());
        };
        let marker = session.delete_scene(index)?;
        Ok(t!(
            "reviewer.scene.deleted",
            position = format_clock(marker.position_ms)
        )
        .to_string())
    }

    fn edit_metadata(&self, session: &mut ReviewSession) -> Result<String> {
        loop {
            self.term.clear_screen()?;
            println!("{}", style(t!("reviewer.metadata.title")).cyan().bold());
            println!("{}", style(t!("common.esc_hint")).dim());

            let metadata = session.metadata();
            let fields = vec![
                format!("{}: {}", t!("reviewer.field.title"), metadata.title),
                format!("{}: {}", t!("reviewer.field.url"), metadata.url),
                format!("{}: {}", t!("reviewer.field.image"), metadata.image_path),
                format!(
                    "{}: {}",
                    t!("reviewer.field.description"),
                    metadata.description.lines().next().unwrap_or_default()
                ),
                format!("{}: {}", t!("reviewer.field.md5sum"), metadata.md5sum),
                format!(
                    "{}: {}",
                    t!("reviewer.field.release_date"),
                    metadata.release_date_text()
                ),
                format!("{}: {}", t!("reviewer.field.actors"), metadata.actors_text()),
                format!(
                    "{}: {}",
                    t!("reviewer.field.categories"),
                    metadata.categories_text()
                ),
                t!("common.back").to_string(),
            ];

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(t!("reviewer.metadata.prompt"))
                .items(&fields)
                .default(0)
                .interact_on_opt(&self.term)?;

            match selection {
                Some(0) => {
                    let value = self.prompt_text(&t!("reviewer.field.title"), &metadata.title)?;
                    if value != session.metadata().title {
                        session.metadata_mut().title = value;
                    }
                }
                Some(1) => {
                    let value = self.prompt_text(&t!("reviewer.field.url"), &metadata.url)?;
                    if value != session.metadata().url {
                        session.metadata_mut().url = value;
                    }
                }
                Some(2) => {
                    let value =
                        self.prompt_text(&t!("reviewer.field.image"), &metadata.image_path)?;
                    if value != session.metadata().image_path {
                        session.metadata_mut().image_path = value;
                    }
                }
                Some(3) => {
                    let value = self.prompt_description(&metadata.description)?;
                    if value != session.metadata().description {
                        session.metadata_mut().description = value;
                    }
                }
                Some(4) => {
                    let value = self.prompt_text(&t!("reviewer.field.md5sum"), &metadata.md5sum)?;
                    if value != session.metadata().md5sum {
                        session.metadata_mut().md5sum = value;
                    }
                }
                Some(5) => {
                    let value = self.prompt_release_date(&metadata.release_date_text())?;
                    if parse_release_date(value.trim()) != session.metadata().release_date {
                        session.metadata_mut().set_release_date_from_text(&value);
                    }
                }
                Some(6) => {
                    let value =
                        self.prompt_text(&t!("reviewer.field.actors"), &metadata.actors_text())?;
                    if value != session.metadata().actors_text() {
                        session.metadata_mut().set_actors_from_text(&value);
                    }
                }
                Some(7) => {
                    let value = self.prompt_text(
                        &t!("reviewer.field.categories"),
                        &metadata.categories_text(),
                    )?;
                    if value != session.metadata().categories_text() {
                        session.metadata_mut().set_categories_from_text(&value);
                    }
                }
                Some(8) | None => break,
                _ => unreachable!(),
            }
        }

        Ok(t!("reviewer.metadata.edited").to_string())
    }

    fn prompt_text(&self, label: &str, current: &str) -> Result<String> {
        let value: String = Input::new()
            .with_prompt(label)
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }

    /// 說明可能有多行，優先使用外部編輯器
    fn prompt_description(&self, current: &str) -> Result<String> {
        match Editor::new().edit(current) {
            Ok(Some(text)) => Ok(text.trim_end_matches('\n').to_string()),
            Ok(None) => Ok(current.to_string()),
            Err(e) => {
                warn!("無法開啟編輯器，改用單行輸入: {e}");
                self.prompt_text(&t!("reviewer.field.description"), current)
            }
        }
    }

    fn prompt_release_date(&self, current: &str) -> Result<String> {
        let value: String = Input::new()
            .with_prompt(t!("reviewer.field.release_date_hint"))
            .with_initial_text(current)
            .allow_empty(true)
            .validate_with(|value: &String| -> Result<(), String> {
                let value = value.trim();
                if value.is_empty() || parse_release_date(value).is_some() {
                    Ok(())
                } else {
                    Err(t!("reviewer.invalid_date").to_string())
                }
            })
            .interact_text()?;
        Ok(value)
    }

    /// 有未儲存的變更時詢問是否儲存，回傳是否離開
    fn confirm_leave(&self, session: &mut ReviewSession) -> Result<bool> {
        if !session.has_unsaved_changes() {
            return Ok(true);
        }

        let options = vec![
            t!("reviewer.leave.save"),
            t!("reviewer.leave.discard"),
            t!("reviewer.leave.stay"),
        ];
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("reviewer.leave.prompt"))
            .items(&options)
            .default(0)
            .interact_on_opt(&self.term)?;

        match selection {
            Some(0) => {
                session.save_metadata()?;
                session.save_scenes()?;
                Ok(true)
            }
            Some(1) => Ok(true),
            Some(2) | None => Ok(false),
            _ => unreachable!(),
        }
    }
}

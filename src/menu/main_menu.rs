use crate::config::save::save_settings;
use crate::config::types::{Config, Language};
use crate::menu::handlers::run_video_reviewer;
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let options = vec![
        t!("main_menu.opt_open_video"),
        t!("main_menu.opt_settings"),
        t!("main_menu.exit"),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("main_menu.prompt"))
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_video_reviewer(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(1) => {
            show_settings_menu(term, config)?;
            Ok(true)
        }
        Some(2) | None => Ok(false),
        _ => unreachable!(),
    }
}

/// 設定選單
fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;

        println!("{}", style(t!("settings.title")).cyan().bold());
        println!("{}", style(t!("common.esc_hint")).dim());

        let options = vec![
            t!("settings.opt_extractor"),
            t!("settings.opt_clear_recent"),
            t!("settings.opt_language"),
            t!("common.back"),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("settings.prompt"))
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => show_extractor_settings_menu(term, config)?,
            Some(1) => clear_recent_videos(config)?,
            Some(2) => show_language_menu(term, config)?,
            Some(3) | None => break,
            _ => unreachable!(),
        }
    }

    Ok(())
}

/// 截圖程式設定
fn show_extractor_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.extractor.title")).cyan().bold());
    println!(
        "\n{} {} (-q:v {})",
        style(t!("settings.extractor.current")).dim(),
        config.settings.frame_extractor.program,
        config.settings.frame_extractor.quality
    );
    println!();

    let program: String = Input::new()
        .with_prompt(t!("settings.extractor.program_prompt"))
        .default(config.settings.frame_extractor.program.clone())
        .validate_with(|value: &String| -> Result<(), String> {
            if value.trim().is_empty() {
                Err(t!("settings.extractor.program_empty").to_string())
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let quality: u8 = Input::new()
        .with_prompt(t!("settings.extractor.quality_prompt"))
        .default(config.settings.frame_extractor.quality)
        .validate_with(|value: &u8| -> Result<(), String> {
            if (1..=31).contains(value) {
                Ok(())
            } else {
                Err(t!("settings.extractor.quality_range").to_string())
            }
        })
        .interact_text()?;

    let program = program.trim().to_string();
    let extractor = &mut config.settings.frame_extractor;
    if extractor.program != program || extractor.quality != quality {
        extractor.program = program;
        extractor.quality = quality;
        save_settings(config)?;
        println!("\n{}", style(t!("settings.saved")).green());
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}

fn clear_recent_videos(config: &mut Config) -> Result<()> {
    config.settings.recent_videos.clear();
    save_settings(config)?;
    println!("\n{}", style(t!("settings.recent_cleared")).green());
    std::thread::sleep(std::time::Duration::from_secs(1));
    Ok(())
}

/// 語言設定選單
fn show_language_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.language.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let items: Vec<String> = Language::ALL.iter().map(ToString::to_string).collect();

    let default_index = Language::ALL
        .iter()
        .position(|&l| l == config.settings.language)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.language.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    let Some(selection) = selection else {
        return Ok(());
    };

    let selected_lang = Language::ALL[selection];

    if selected_lang != config.settings.language {
        config.settings.language = selected_lang;
        rust_i18n::set_locale(selected_lang.as_str());
        save_settings(config)?;
        println!(
            "\n{} {}",
            style(t!("settings.saved")).green(),
            selected_lang
        );
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}

//! quiz-scene: the quiz application.
//!
//! Wires configuration, the question model, text engine, canvas and window
//! together. Frame painting lives in [`render`] and [`animation`], pointer
//! handling in [`input`].

use anyhow::{Context, Result};
use quiz_config::QuizConfig;
use quiz_core::QuizModel;
use quiz_text::TextEngine;
use quiz_window::QuizWindow;

pub mod animation;
pub mod app;
pub mod button;
pub mod input;
pub mod render;
pub mod trail;

pub use app::QuizApp;

/// Load everything and run the event loop until the window closes.
pub fn run() -> Result<()> {
    let config = QuizConfig::load();
    log::info!(
        "config: data={} window={}x{} animation speed={}",
        config.data.path.display(),
        config.window.width,
        config.window.height,
        config.animation.speed
    );

    let model = QuizModel::load_or_fallback(&config.data.path);
    let text = TextEngine::load(config.text.font.as_deref()).context("failed to load a font")?;
    let window = QuizWindow::new(&config.window)?;
    let app = QuizApp::new(&config, model, text)?;
    window.run(app)
}

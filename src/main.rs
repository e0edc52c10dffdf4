use anyhow::Result;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("quizcanvas {} starting", env!("CARGO_PKG_VERSION"));
    quiz_scene::run()
}

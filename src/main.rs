use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use cozy_room::app::App;
use cozy_room::cli::Cli;
use cozy_room::config::SceneConfig;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = SceneConfig::resolve(&cli)?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);

    println!("Cozy Room - Controls: drag to orbit, scroll to zoom, click the record player");
    println!("  T toggles day/night, M toggles music, Escape to quit");
    event_loop.run_app(&mut app)?;

    if app.exit_code() != 0 {
        std::process::exit(app.exit_code());
    }
    Ok(())
}

mod app;
mod audio;
mod chooser;
mod config;
mod download;
mod error;
mod handle;
mod mpris;
mod runtime;
mod ui;
mod widget;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}

use clap::Parser;
use gtk::prelude::*;
use gtk::{Application, glib};

use snipview::cli::Cli;
use snipview::logging;
use snipview::services::pdf_render::bind_pdfium;
use snipview::settings::Settings;
use snipview::widgets::ViewerWindow;

const APP_ID: &str = "io.github.snipview";

fn run() -> anyhow::Result<glib::ExitCode> {
    let cli = Cli::parse();

    let (settings, settings_error) = Settings::load();
    let settings = settings.apply(cli.overrides());
    logging::init(&settings)?;

    if let Some(e) = settings_error {
        log::warn!("{}; using default settings", e);
    }
    if settings.effective_render_scale() != settings.render_scale {
        log::warn!(
            "Ignoring render scale {}; using {}",
            settings.render_scale,
            settings.effective_render_scale()
        );
    }

    let pdfium = bind_pdfium(settings.pdfium_library_dir.as_deref())
        .map_err(|e| anyhow::anyhow!("failed to bind PDFium: {}", e))?;

    let render_scale = settings.effective_render_scale();
    let app = Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        let window = ViewerWindow::new(app, pdfium, render_scale);
        if let Some(file) = &cli.file {
            window.open_file(file, cli.page);
        }
        window.present();
    });

    log::info!("Starting snipview");
    // clap already consumed the command line
    Ok(app.run_with_args::<&str>(&[]))
}

fn main() -> glib::ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("snipview: {:#}", e);
            glib::ExitCode::FAILURE
        }
    }
}

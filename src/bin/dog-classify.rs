use std::ffi::OsString;

use dog_classifier::{
    args, dc_err, error::ClassifierError, help, init, model, pipeline, report,
};

fn main() {
    let arguments: Vec<_> = std::env::args_os().collect();

    if let Err(e) = real_main(arguments) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn real_main(arguments: Vec<OsString>) -> Result<(), ClassifierError> {
    help::maybe_print_help_and_exit("dog-classify");
    init::init();
    let config = args::parse_args(arguments)?;

    // read the upload before the model so that a bad path doesn't cost a download
    let bytes = std::fs::read(&config.input).map_err(|error| {
        dc_err!("unable to open image '{}': {error}", config.input.display())
    })?;

    let classifier = model::classifier(&config.source)?;
    let result = pipeline::classify_bytes(&bytes, classifier, config.top)?;

    print!("{}", report::render_text(&result.predictions));

    if let Some(path) = &config.html {
        let image = report::encode_png_base64(&result.image.image.pixels)?;
        let html = report::render_html(&image, &result.predictions, &config.examples_url);
        std::fs::write(path, html)
            .map_err(|error| dc_err!("unable to write '{}': {error}", path.display()))?;
        tracing::info!("wrote {}", path.display());
    }
    Ok(())
}

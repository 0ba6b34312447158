pub mod assemble;
pub mod assets;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod docx;
mod error;
pub mod generate;
pub mod intake;
pub mod model;

pub use assemble::{BrandingRecord, assemble};
pub use catalog::Catalog;
pub use error::Error;

use std::path::Path;
use std::time::Instant;

/// Default file name for the generated document, e.g. `SOW_Gen_AI_Speech_To_Speech.docx`.
pub fn output_file_name(offering: &str) -> String {
    format!("SOW_{}.docx", offering.replace(' ', "_"))
}

/// Assemble `generated_text` into a branded SOW and serialize it as DOCX bytes.
pub fn build_sow_docx(
    generated_text: &str,
    branding: &BrandingRecord,
    offering: &str,
    catalog: &Catalog,
) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();

    let doc = assemble(generated_text, branding, offering, catalog);
    let t_assemble = t0.elapsed();

    let bytes = docx::render(&doc)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: assemble={:.1}ms, render={:.1}ms, total={:.1}ms ({} blocks, {} images, output {} bytes)",
        t_assemble.as_secs_f64() * 1000.0,
        (t_total - t_assemble).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        doc.blocks.len(),
        doc.images().count(),
        bytes.len(),
    );

    Ok(bytes)
}

pub fn write_sow_docx(
    generated_text: &str,
    branding: &BrandingRecord,
    offering: &str,
    catalog: &Catalog,
    output: &Path,
) -> Result<(), Error> {
    let bytes = build_sow_docx(generated_text, branding, offering, catalog)?;
    std::fs::write(output, &bytes).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", e, output.display()),
        ))
    })?;
    log::info!("Wrote {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}

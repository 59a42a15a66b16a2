//! Spreadsheet files written on this machine: saved server exports,
//! the presents list and the import template.

use std::path::{Path, PathBuf};

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};

use crate::error::{AppError, Result};
use crate::models::{Present, format_timestamp};

/// Columns of the import template, in the order the server reads them.
pub const TEMPLATE_HEADERS: [&str; 3] = ["nom", "prenom", "telephone"];

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
}

fn write_headers(worksheet: &mut Worksheet, headers: &[&str], widths: &[f64]) -> std::result::Result<(), XlsxError> {
    let format = header_format();
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &format)?;
    }
    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }
    Ok(())
}

/// Write downloaded export bytes to `dir/filename`, creating `dir` if needed.
pub fn save_export(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    if bytes.is_empty() {
        return Err(AppError::export("Fichier d'export vide"));
    }
    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, bytes)?;
    tracing::info!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}

/// Export the people currently inside to an Excel file.
pub fn export_presents_to_excel(data: &[Present], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Présents")?;

    write_headers(worksheet, &["Nom", "Prénom", "Téléphone", "Entrée"], &[20.0, 20.0, 15.0, 20.0])?;

    for (idx, present) in data.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, &present.nom)?;
        worksheet.write_string(row, 1, &present.prenom)?;
        worksheet.write_string(row, 2, &present.telephone)?;
        worksheet.write_string(row, 3, format_timestamp(&present.heure_entree))?;
    }

    if !data.is_empty() {
        worksheet.autofilter(0, 0, data.len() as u32, 3)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    tracing::info!("Exported {} presents to {}", data.len(), path.display());
    Ok(())
}

/// Empty workbook with the columns bulk import expects.
pub fn write_import_template(path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Membres")?;

    write_headers(worksheet, &TEMPLATE_HEADERS, &[20.0, 20.0, 15.0])?;
    // Phone numbers keep their leading zeros
    worksheet.set_column_format(2, &Format::new().set_num_format("@"))?;
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("Excel", &["xlsx"])
        .save_file()
}

/// Open file dialog for a members import.
pub fn pick_import_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Tableur ou CSV", &crate::admin::IMPORT_EXTENSIONS)
        .pick_file()
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}

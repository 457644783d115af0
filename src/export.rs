//! Excel export of medical records.

use crate::models::{MedicalRecords, RecordSection};
use chrono::{Local, NaiveDate};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Export medical records to an Excel file.
/// `Overview` writes every section on its own sheet; any other section
/// writes just that sheet.
pub fn export_medical_records_to_excel(
    records: &MedicalRecords,
    section: RecordSection,
    path: &Path,
) -> crate::Result<()> {
    let mut workbook = build_records_workbook(records, section)?;
    workbook.save(path)?;
    Ok(())
}

/// Build the records workbook without writing it to disk.
pub fn build_records_workbook(records: &MedicalRecords, section: RecordSection) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();

    let sections = match section {
        RecordSection::Overview => RecordSection::ALL[1..].to_vec(),
        other => vec![other],
    };

    for section in sections {
        let worksheet = workbook.add_worksheet();
        match section {
            RecordSection::LabResults => write_lab_results(worksheet, records)?,
            RecordSection::Medications => write_medications(worksheet, records)?,
            RecordSection::Allergies => write_allergies(worksheet, records)?,
            RecordSection::Immunizations => write_immunizations(worksheet, records)?,
            RecordSection::Overview => {}
        }
    }

    Ok(workbook)
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
}

/// Name the sheet, write the header row, and size the columns.
fn write_header(worksheet: &mut Worksheet, name: &str, columns: &[(&str, u16)]) -> Result<(), XlsxError> {
    worksheet.set_name(name)?;

    let header_format = header_format();
    for (col, (header, width)) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        worksheet.set_column_width(col as u16, *width)?;
    }
    Ok(())
}

/// Autofilter and freeze the header row.
fn finish_sheet(worksheet: &mut Worksheet, rows: usize, last_col: u16) -> Result<(), XlsxError> {
    if rows > 0 {
        worksheet.autofilter(0, 0, rows as u32, last_col)?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn date_string(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn write_lab_results(worksheet: &mut Worksheet, records: &MedicalRecords) -> Result<(), XlsxError> {
    write_header(
        worksheet,
        "Lab Results",
        &[("Test", 32), ("Date", 12), ("Doctor", 24), ("Status", 10)],
    )?;

    for (idx, result) in records.lab_results.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, &result.name)?;
        worksheet.write_string(row, 1, date_string(result.date))?;
        worksheet.write_string(row, 2, &result.doctor)?;
        worksheet.write_string(row, 3, result.status.label())?;
    }

    finish_sheet(worksheet, records.lab_results.len(), 3)
}

fn write_medications(worksheet: &mut Worksheet, records: &MedicalRecords) -> Result<(), XlsxError> {
    write_header(
        worksheet,
        "Medications",
        &[
            ("Medication", 18),
            ("Dosage", 10),
            ("Frequency", 30),
            ("Prescribed By", 24),
            ("Start Date", 12),
            ("Refills Remaining", 18),
            ("Status", 10),
        ],
    )?;

    for (idx, med) in records.medications.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, &med.name)?;
        worksheet.write_string(row, 1, &med.dosage)?;
        worksheet.write_string(row, 2, &med.frequency)?;
        worksheet.write_string(row, 3, &med.prescribed_by)?;
        worksheet.write_string(row, 4, date_string(med.start_date))?;
        worksheet.write_number(row, 5, med.refills_remaining)?;
        worksheet.write_string(row, 6, if med.needs_refill() { "Refill due" } else { "" })?;
    }

    finish_sheet(worksheet, records.medications.len(), 6)
}

fn write_allergies(worksheet: &mut Worksheet, records: &MedicalRecords) -> Result<(), XlsxError> {
    write_header(
        worksheet,
        "Allergies",
        &[("Allergen", 20), ("Reaction", 20), ("Severity", 10)],
    )?;

    for (idx, allergy) in records.allergies.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, &allergy.name)?;
        worksheet.write_string(row, 1, &allergy.reaction)?;
        worksheet.write_string(row, 2, allergy.severity.label())?;
    }

    finish_sheet(worksheet, records.allergies.len(), 2)
}

fn write_immunizations(worksheet: &mut Worksheet, records: &MedicalRecords) -> Result<(), XlsxError> {
    write_header(
        worksheet,
        "Immunizations",
        &[("Vaccine", 36), ("Date", 12), ("Provider", 26)],
    )?;

    for (idx, shot) in records.immunizations.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, &shot.name)?;
        worksheet.write_string(row, 1, date_string(shot.date))?;
        worksheet.write_string(row, 2, &shot.provider)?;
    }

    finish_sheet(worksheet, records.immunizations.len(), 2)
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("Excel Files", &["xlsx"])
        .save_file()
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}

/// Filename prefix for a records section.
pub fn export_prefix(section: RecordSection) -> &'static str {
    match section {
        RecordSection::Overview => "medical_records",
        RecordSection::LabResults => "lab_results",
        RecordSection::Medications => "medications",
        RecordSection::Allergies => "allergies",
        RecordSection::Immunizations => "immunizations",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_writes_every_section() {
        let records = MedicalRecords::sample();
        let mut workbook = build_records_workbook(&records, RecordSection::Overview).unwrap();
        assert_eq!(workbook.worksheet_from_index(0).unwrap().name(), "Lab Results");
        assert_eq!(workbook.worksheet_from_index(3).unwrap().name(), "Immunizations");
        assert!(workbook.worksheet_from_index(4).is_err());

        let bytes = workbook.save_to_buffer().unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_single_section_export() {
        let records = MedicalRecords::sample();
        let mut workbook = build_records_workbook(&records, RecordSection::Allergies).unwrap();
        assert_eq!(workbook.worksheet_from_index(0).unwrap().name(), "Allergies");
        assert!(workbook.worksheet_from_index(1).is_err());
    }

    #[test]
    fn test_empty_records_still_export() {
        let mut workbook = build_records_workbook(&MedicalRecords::default(), RecordSection::Medications).unwrap();
        assert!(workbook.save_to_buffer().is_ok());
    }

    #[test]
    fn test_export_to_file() {
        let path = std::env::temp_dir().join(format!("medicare-records-{}.xlsx", std::process::id()));
        export_medical_records_to_excel(&MedicalRecords::sample(), RecordSection::Overview, &path).unwrap();
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_generate_export_filename() {
        let name = generate_export_filename(export_prefix(RecordSection::LabResults));
        assert!(name.starts_with("lab_results_"));
        assert!(name.ends_with(".xlsx"));
    }
}

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::career::scoring::CareerPlan;
use crate::export::sanitize_name;
use crate::reference::models::CellValue;

pub const PLAN_SHEET_NAME: &str = "Plan Carrera";

/// Every column of the plan is rendered at this width.
pub const PLAN_COLUMN_WIDTH: f64 = 25.0;

/// `plan_carrera_<Name_with_underscores>.xlsx`
pub fn plan_filename(name: &str) -> String {
    format!("plan_carrera_{}.xlsx", sanitize_name(name))
}

/// Encodes the ranked table in memory: reference columns, then `Score`.
pub fn render_career_plan(plan: &CareerPlan) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(PLAN_SHEET_NAME)?;

    let score_col = column(plan.header.len() - 1)?;
    for (col, title) in plan.header.iter().enumerate() {
        let col = column(col)?;
        worksheet.write_string_with_format(0, col, title, &header_format)?;
        worksheet.set_column_width(col, PLAN_COLUMN_WIDTH)?;
    }

    for (i, row) in plan.rows.iter().enumerate() {
        let r = u32::try_from(i + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        for (col, cell) in row.cells.iter().enumerate() {
            let col = column(col)?;
            match cell {
                CellValue::Empty => continue,
                CellValue::Number(n) => worksheet.write_number(r, col, *n)?,
                CellValue::Text(s) => worksheet.write_string(r, col, s)?,
            };
        }
        worksheet.write_number(r, score_col, row.score)?;
    }

    workbook.save_to_buffer()
}

fn column(index: usize) -> Result<u16, XlsxError> {
    u16::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

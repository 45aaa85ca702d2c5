use super::RawRow;
use crate::config::SheetLayout;
use crate::model::{EmployeeNumber, EmployeeRecord, EmployeeSchedule, ScheduleHeader};
use crate::shift::ShiftRules;
use crate::sheet::CellSource;
use tracing::{debug, info};

/// Construit le planning d'un employé à partir de sa ligne (une cellule par jour).
pub fn parse_employee<S: CellSource + ?Sized>(
    sheet: &S,
    raw: &RawRow,
    header: &ScheduleHeader,
    layout: &SheetLayout,
    rules: &ShiftRules,
) -> EmployeeSchedule {
    let number = EmployeeNumber::parse(&raw.number);
    if let EmployeeNumber::Label(label) = &number {
        info!(row = raw.row, label = label.as_str(), "not a number in employee number column");
    }
    let record = EmployeeRecord {
        number,
        name: raw.name.clone(),
        source_row: raw.row,
    };

    let shifts: Vec<_> = header
        .dates()
        .zip(layout.first_shift_col..)
        .filter_map(|(date, col)| rules.interpret(&sheet.cell_text(raw.row, col), date))
        .collect();

    debug!(row = raw.row, name = record.name.as_str(), shifts = shifts.len(), "employee parsed");
    EmployeeSchedule { record, shifts }
}

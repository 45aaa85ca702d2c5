mod employee;
mod rows;

pub use employee::parse_employee;
pub use rows::{pair_merged_rows, scan_rows, RawRow};

use crate::config::ParserConfig;
use crate::header::resolve_header;
use crate::model::{EmployeeSchedule, ParsedSchedule};
use crate::sheet::CellSource;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("header cell does not match '<month> ... <year>': {0:?}")]
    HeaderFormat(String),
    #[error("invalid schedule period {year}-{month}")]
    InvalidPeriod { year: i32, month: u32 },
    #[error("workbook has no sheet: {0}")]
    EmptyWorkbook(String),
    #[error(transparent)]
    Workbook(#[from] calamine::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Parser de tableau de service : en-tête, lignes d'employés, gardes.
#[derive(Debug, Clone, Default)]
pub struct ScheduleParser {
    config: ParserConfig,
}

impl ScheduleParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse une feuille complète. Seul un en-tête illisible est fatal ;
    /// les problèmes de ligne ou de cellule sont journalisés puis ignorés.
    pub fn parse<S: CellSource + ?Sized>(&self, sheet: &S) -> Result<ParsedSchedule, ParseError> {
        let layout = &self.config.layout;
        let text = sheet.cell_text(layout.header_cell.row, layout.header_cell.col);
        let header = resolve_header(&text, &self.config.months)?;
        let days = header.days_in_month();
        info!(year = header.year(), month = header.month(), days, "schedule period resolved");

        let raw = scan_rows(sheet, layout);
        debug!(rows = raw.len(), "employee rows retained");
        let paired = pair_merged_rows(raw);

        let employees: Vec<EmployeeSchedule> = paired
            .iter()
            .map(|row| parse_employee(sheet, row, &header, layout, &self.config.shifts))
            .collect();

        Ok(ParsedSchedule { header, employees })
    }
}

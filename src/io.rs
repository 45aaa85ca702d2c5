use crate::model::EmployeeSchedule;
use crate::shift::ShiftRules;
use csv::WriterBuilder;
use std::path::Path;

/// Export CSV des gardes: header `number,name,date,code,start,end`
pub fn export_shifts_csv<P: AsRef<Path>>(
    path: P,
    schedules: &[EmployeeSchedule],
    rules: &ShiftRules,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["number", "name", "date", "code", "start", "end"])?;
    for schedule in schedules {
        let number = schedule.record.number.to_string();
        for shift in &schedule.shifts {
            let interval = rules.interval(shift);
            let date = shift.date.to_string();
            let code = rules.code_for(shift.kind).to_string();
            let start = interval.start.format("%Y-%m-%dT%H:%M:%S").to_string();
            let end = interval.end.format("%Y-%m-%dT%H:%M:%S").to_string();
            w.write_record([
                number.as_str(),
                schedule.record.name.as_str(),
                date.as_str(),
                code.as_str(),
                start.as_str(),
                end.as_str(),
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}

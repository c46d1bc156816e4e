//! Build the date, schedule and personalization tables from a workbook.

use serde::{Deserialize, Serialize};

use crate::color::ColorTag;
use crate::dates::{DateTable, DayColor};
use crate::error::{SchedGenError, SchedGenResult};
use crate::period::PeriodSlot;
use crate::personalization::{Personalization, PersonalizationEntry, TABLE_ROWS};
use crate::schedule::ScheduleTable;
use crate::workbook::{Cell, Workbook};

/// First row of period definitions in a schedule sheet (rows 1-3 are titles).
const SCHEDULE_FIRST_ROW: u32 = 4;
/// First personalization row (row 1 is the header).
const PERSONALIZATION_FIRST_ROW: u32 = 2;

fn default_dates_sheet() -> String {
    "Dates".to_string()
}

fn default_personalization_sheet() -> String {
    "Personal Schedule".to_string()
}

fn default_non_schedule_sheets() -> Vec<String> {
    [
        "Calculating",
        "Date Not Found",
        "Days Til School",
        "PD",
        "No School",
        "Past Dates",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Where the tables live in the workbook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetLayout {
    #[serde(default = "default_dates_sheet")]
    pub dates: String,

    #[serde(default = "default_personalization_sheet")]
    pub personalization: String,

    /// Sheets that are neither the date table, the personalization sheet nor
    /// a schedule (display sheets, countdowns, ...).
    #[serde(default = "default_non_schedule_sheets")]
    pub non_schedule: Vec<String>,
}

impl Default for SheetLayout {
    fn default() -> Self {
        SheetLayout {
            dates: default_dates_sheet(),
            personalization: default_personalization_sheet(),
            non_schedule: default_non_schedule_sheets(),
        }
    }
}

impl SheetLayout {
    pub fn is_schedule_sheet(&self, name: &str) -> bool {
        name != self.dates
            && name != self.personalization
            && !self.non_schedule.iter().any(|s| s == name)
    }
}

/// Everything a run reads from the workbook, loaded once.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub dates: DateTable,
    pub schedules: ScheduleTable,
    pub personalization: Personalization,
}

impl Tables {
    pub fn load(workbook: &Workbook, layout: &SheetLayout) -> SchedGenResult<Self> {
        let dates = load_dates(workbook, layout)?;
        let schedules = load_schedules(workbook, layout)?;
        let personalization = load_personalization(workbook, layout)?;

        tracing::info!(
            days = dates.len(),
            schedules = schedules.len(),
            personalizations = personalization.len(),
            "loaded tables"
        );

        Ok(Tables {
            dates,
            schedules,
            personalization,
        })
    }
}

/// Date table: column B holds the date, column C the tag. Rows without a
/// date (headers, notes) are skipped.
pub fn load_dates(workbook: &Workbook, layout: &SheetLayout) -> SchedGenResult<DateTable> {
    let last_row = workbook.last_row(&layout.dates)?;
    let rows = workbook.range(&layout.dates, 1, 2, last_row, 2)?;

    let days = rows
        .iter()
        .filter_map(|row| {
            let date = row[0].as_date()?;
            let tag = row[1].as_text()?;
            Some(DayColor::new(date, ColorTag::parse(&tag)))
        })
        .collect();

    DateTable::new(days)
}

/// One schedule per remaining sheet: identifier, start and end in columns
/// B-D from row 4 down.
pub fn load_schedules(workbook: &Workbook, layout: &SheetLayout) -> SchedGenResult<ScheduleTable> {
    let mut schedules = ScheduleTable::new();

    for name in workbook.sheet_names() {
        if !layout.is_schedule_sheet(name) {
            continue;
        }

        let last_row = workbook.last_row(name)?;
        if last_row < SCHEDULE_FIRST_ROW {
            tracing::warn!(sheet = name, "schedule sheet has no periods");
            schedules.insert(ColorTag::parse(name), Vec::new());
            continue;
        }

        let rows = workbook.range(name, SCHEDULE_FIRST_ROW, 2, last_row - SCHEDULE_FIRST_ROW + 1, 3)?;
        let mut slots = Vec::new();

        for (i, row) in rows.iter().enumerate() {
            let Some(period) = row[0].as_period() else {
                continue;
            };
            let row_number = SCHEDULE_FIRST_ROW + i as u32;
            let start = parse_time(&row[1], name, row_number, "start")?;
            let end = parse_time(&row[2], name, row_number, "end")?;
            slots.push(PeriodSlot::new(period, start, end));
        }

        tracing::debug!(sheet = name, periods = slots.len(), "loaded schedule");
        schedules.insert(ColorTag::parse(name), slots);
    }

    Ok(schedules)
}

fn parse_time(cell: &Cell, sheet: &str, row: u32, which: &str) -> SchedGenResult<chrono::NaiveTime> {
    cell.as_time().ok_or_else(|| SchedGenError::InvalidCell {
        sheet: sheet.to_string(),
        row,
        reason: format!("{which} time {cell:?} is not a time"),
    })
}

/// Personalization rows are positional: identifier, title, location in
/// columns A-C from row 2.
pub fn load_personalization(
    workbook: &Workbook,
    layout: &SheetLayout,
) -> SchedGenResult<Personalization> {
    let sheet = &layout.personalization;
    let last_row = workbook.last_row(sheet)?;
    let filled = last_row.saturating_sub(PERSONALIZATION_FIRST_ROW - 1) as usize;

    if filled < TABLE_ROWS {
        tracing::warn!(
            sheet = %sheet,
            rows = filled,
            expected = TABLE_ROWS,
            "personalization sheet is short, missing rows are left blank"
        );
    }

    let rows = workbook.range(sheet, PERSONALIZATION_FIRST_ROW, 1, TABLE_ROWS as u32, 3)?;

    Ok(Personalization::from_rows(rows.iter().map(|row| {
        PersonalizationEntry::new(
            row[1].as_text().unwrap_or_default(),
            row[2].as_text().unwrap_or_default(),
        )
    })))
}

// src/services/attendance.rs

use crate::{
    errors::{AppError, AppResult},
    models::{
        AttendanceQuery, AttendanceRecord, AttendanceStats, AttendanceStatus, ClockPhase,
        ClockState, ClockStatus, UpdateAttendanceRequest,
    },
    store::ConsoleData,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rust_decimal_macros::dec;
use uuid::Uuid;

const MS_PER_HOUR: Decimal = dec!(3600000);

/// Hours between two instants, unrounded.
pub fn elapsed_hours(start: DateTime<Utc>, now: DateTime<Utc>) -> Decimal {
    Decimal::from((now - start).num_milliseconds()) / MS_PER_HOUR
}

/// Renders hours as "Xh Ym", flooring both parts.
pub fn format_duration(hours: Decimal) -> String {
    let hours = hours.max(Decimal::ZERO);
    let whole = hours.floor();
    let minutes = ((hours - whole) * dec!(60)).floor();
    format!(
        "{}h {}m",
        whole.to_i64().unwrap_or_default(),
        minutes.to_i64().unwrap_or_default()
    )
}

// ─── Clock state machine ──────────────────────────────────────────────────────

impl ClockState {
    pub fn phase(&self) -> ClockPhase {
        match (self.clocked_in, self.on_break) {
            (false, _) => ClockPhase::ClockedOut,
            (true, false) => ClockPhase::ClockedIn,
            (true, true) => ClockPhase::OnBreak,
        }
    }

    pub fn clock_in(&mut self, now: DateTime<Utc>) -> AppResult<()> {
        if self.phase() != ClockPhase::ClockedOut {
            return Err(AppError::InvalidTransition("already clocked in".to_string()));
        }
        self.clocked_in = true;
        self.on_break = false;
        self.clock_in_time = Some(now);
        self.break_start_time = None;
        Ok(())
    }

    pub fn start_break(&mut self, now: DateTime<Utc>) -> AppResult<()> {
        match self.phase() {
            ClockPhase::ClockedIn => {
                self.on_break = true;
                self.break_start_time = Some(now);
                Ok(())
            }
            ClockPhase::OnBreak => Err(AppError::InvalidTransition("already on break".to_string())),
            ClockPhase::ClockedOut => Err(AppError::InvalidTransition("not clocked in".to_string())),
        }
    }

    pub fn end_break(&mut self, now: DateTime<Utc>) -> AppResult<()> {
        if self.phase() != ClockPhase::OnBreak {
            return Err(AppError::InvalidTransition("not on break".to_string()));
        }
        if let Some(start) = self.break_start_time.take() {
            self.total_break_time += elapsed_hours(start, now);
        }
        self.on_break = false;
        Ok(())
    }

    /// Valid from `ClockedIn` or `OnBreak`. The whole span since clock-in
    /// counts as worked time.
    pub fn clock_out(&mut self, now: DateTime<Utc>) -> AppResult<()> {
        if self.phase() == ClockPhase::ClockedOut {
            return Err(AppError::InvalidTransition("not clocked in".to_string()));
        }
        if let Some(start) = self.clock_in_time.take() {
            self.total_worked_hours += elapsed_hours(start, now);
        }
        self.clocked_in = false;
        self.on_break = false;
        self.break_start_time = None;
        Ok(())
    }

    pub fn status(&self, now: DateTime<Utc>) -> ClockStatus {
        let session = self
            .clock_in_time
            .map(|start| elapsed_hours(start, now))
            .unwrap_or_default();
        let current_break = self
            .break_start_time
            .map(|start| elapsed_hours(start, now))
            .unwrap_or_default();

        ClockStatus {
            phase: self.phase(),
            clock_in_time: self.clock_in_time,
            break_start_time: self.break_start_time,
            current_session: format_duration(session),
            current_break: format_duration(current_break),
            total_worked: format_duration(self.total_worked_hours),
            total_break: format_duration(self.total_break_time),
            total_worked_hours: self.total_worked_hours,
            total_break_time: self.total_break_time,
        }
    }
}

// ─── Attendance records ───────────────────────────────────────────────────────

pub const CSV_HEADER: &str =
    "Employee ID,Employee Name,Date,Clock In,Clock Out,Total Hours,Status,Overtime";

pub struct AttendanceService;

impl AttendanceService {
    pub fn filter<'a>(
        records: &'a [AttendanceRecord],
        query: &AttendanceQuery,
    ) -> Vec<&'a AttendanceRecord> {
        let term = query.search.as_deref().unwrap_or_default().to_lowercase();
        records
            .iter()
            .filter(|r| {
                r.employee_name.to_lowercase().contains(&term)
                    || r.employee_id.to_lowercase().contains(&term)
            })
            .filter(|r| query.date.is_none_or(|d| r.date == d))
            .filter(|r| query.status.is_none_or(|s| r.status == s))
            .collect()
    }

    /// Fields are joined verbatim; embedded commas are not escaped.
    pub fn to_csv(records: &[&AttendanceRecord]) -> String {
        let mut lines = Vec::with_capacity(records.len() + 1);
        lines.push(CSV_HEADER.to_string());
        for r in records {
            lines.push(
                [
                    r.employee_id.clone(),
                    r.employee_name.clone(),
                    r.date.to_string(),
                    r.clock_in.clone(),
                    r.clock_out.clone(),
                    r.total_hours.normalize().to_string(),
                    r.status.as_str().to_string(),
                    r.overtime.normalize().to_string(),
                ]
                .join(","),
            );
        }
        lines.join("\n")
    }

    pub fn stats(data: &ConsoleData, date: NaiveDate) -> AttendanceStats {
        let day: Vec<&AttendanceRecord> = data.attendance.iter().filter(|r| r.date == date).collect();
        let count = |status: AttendanceStatus| day.iter().filter(|r| r.status == status).count();

        let headcount = data.employees.len();
        let attended = day.iter().filter(|r| r.status != AttendanceStatus::Absent).count();
        let attendance_rate = if headcount == 0 {
            0
        } else {
            ((attended * 200 + headcount) / (headcount * 2)) as u32
        };

        AttendanceStats {
            date,
            headcount,
            present: count(AttendanceStatus::Present),
            late: count(AttendanceStatus::Late),
            absent: count(AttendanceStatus::Absent),
            attendance_rate,
        }
    }

    pub fn recent_for(data: &ConsoleData, employee_id: &str, limit: usize) -> Vec<AttendanceRecord> {
        let mut records: Vec<AttendanceRecord> = data
            .attendance
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records.truncate(limit);
        records
    }

    pub fn update(
        data: &mut ConsoleData,
        id: Uuid,
        body: UpdateAttendanceRequest,
    ) -> AppResult<AttendanceRecord> {
        for value in [&body.clock_in, &body.clock_out].into_iter().flatten() {
            validate_clock_time(value)?;
        }
        for (field, value) in [
            ("total_hours", body.total_hours),
            ("break_time", body.break_time),
            ("overtime", body.overtime),
        ] {
            if value.is_some_and(|v| v < Decimal::ZERO) {
                return Err(AppError::Validation(format!("{field} cannot be negative")));
            }
        }

        let record = data
            .attendance
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Attendance record {id} not found")))?;

        if let Some(v) = body.clock_in {
            record.clock_in = v;
        }
        if let Some(v) = body.clock_out {
            record.clock_out = v;
        }
        if let Some(v) = body.total_hours {
            record.total_hours = v;
        }
        if let Some(v) = body.break_time {
            record.break_time = v;
        }
        if let Some(v) = body.overtime {
            record.overtime = v;
        }
        if let Some(v) = body.status {
            record.status = v;
        }

        Ok(record.clone())
    }
}

fn validate_clock_time(value: &str) -> AppResult<()> {
    if value == "-" || NaiveTime::parse_from_str(value, "%H:%M").is_ok() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "'{value}' is not a HH:MM time or '-'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initial::demo_data;
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 24, h, m, 0).unwrap()
    }

    #[test]
    fn full_shift_accumulates_work_and_break() {
        let mut state = ClockState::default();
        state.clock_in(at(9, 0)).unwrap();
        state.start_break(at(12, 0)).unwrap();
        state.end_break(at(12, 45)).unwrap();
        state.clock_out(at(17, 30)).unwrap();

        assert_eq!(state.phase(), ClockPhase::ClockedOut);
        assert_eq!(state.total_worked_hours, dec!(8.5));
        assert_eq!(state.total_break_time, dec!(0.75));
        assert!(state.clock_in_time.is_none());
        assert!(state.break_start_time.is_none());
    }

    #[test]
    fn clock_out_from_break_clears_break() {
        let mut state = ClockState::default();
        state.clock_in(at(9, 0)).unwrap();
        state.start_break(at(10, 0)).unwrap();
        state.clock_out(at(11, 0)).unwrap();

        assert_eq!(state.total_worked_hours, dec!(2));
        assert_eq!(state.total_break_time, Decimal::ZERO);
        assert!(!state.on_break);
    }

    #[test]
    fn invalid_transitions_are_rejected() {
        let mut state = ClockState::default();
        assert!(state.start_break(at(9, 0)).is_err());
        assert!(state.end_break(at(9, 0)).is_err());
        assert!(state.clock_out(at(9, 0)).is_err());

        state.clock_in(at(9, 0)).unwrap();
        assert!(state.clock_in(at(9, 5)).is_err());
        assert!(state.end_break(at(9, 5)).is_err());

        state.start_break(at(10, 0)).unwrap();
        assert!(state.start_break(at(10, 1)).is_err());
        assert!(state.clock_in(at(10, 1)).is_err());
    }

    #[test]
    fn totals_accumulate_across_sessions() {
        let mut state = ClockState::default();
        state.clock_in(at(8, 0)).unwrap();
        state.clock_out(at(10, 0)).unwrap();
        state.clock_in(at(11, 0)).unwrap();
        state.clock_out(at(11, 30)).unwrap();
        assert_eq!(state.total_worked_hours, dec!(2.5));
    }

    #[test]
    fn status_reports_live_session() {
        let mut state = ClockState::default();
        state.clock_in(at(9, 0)).unwrap();
        let status = state.status(at(9, 0) + Duration::minutes(135) + Duration::seconds(59));
        assert_eq!(status.phase, ClockPhase::ClockedIn);
        assert_eq!(status.current_session, "2h 15m");
        assert_eq!(status.current_break, "0h 0m");
    }

    #[test]
    fn format_duration_floors() {
        assert_eq!(format_duration(dec!(0)), "0h 0m");
        assert_eq!(format_duration(dec!(8.5)), "8h 30m");
        assert_eq!(format_duration(dec!(1.999)), "1h 59m");
    }

    #[test]
    fn filter_by_search_date_and_status() {
        let data = demo_data();
        let oct24 = NaiveDate::from_ymd_opt(2024, 10, 24).unwrap();

        let by_name = AttendanceQuery { search: Some("john".into()), ..Default::default() };
        assert_eq!(AttendanceService::filter(&data.attendance, &by_name).len(), 2);

        let by_day = AttendanceQuery { date: Some(oct24), ..Default::default() };
        assert_eq!(AttendanceService::filter(&data.attendance, &by_day).len(), 3);

        let late = AttendanceQuery { status: Some(AttendanceStatus::Late), ..Default::default() };
        let found = AttendanceService::filter(&data.attendance, &late);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].employee_id, "EMP002");
    }

    #[test]
    fn csv_export_layout() {
        let data = demo_data();
        let query = AttendanceQuery { search: Some("EMP003".into()), ..Default::default() };
        let csv = AttendanceService::to_csv(&AttendanceService::filter(&data.attendance, &query));

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "EMP003,Mike Wilson,2024-10-24,-,-,0,absent,0");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn csv_does_not_escape_commas() {
        let mut data = demo_data();
        data.attendance[0].employee_name = "Doe, John".to_string();
        let all: Vec<&AttendanceRecord> = data.attendance.iter().collect();
        let csv = AttendanceService::to_csv(&all);
        assert!(csv.lines().nth(1).unwrap().starts_with("EMP001,Doe, John,2024-10-24,09:00,17:30,8.5,present,0.5"));
    }

    #[test]
    fn stats_for_seeded_day() {
        let data = demo_data();
        let stats = AttendanceService::stats(&data, NaiveDate::from_ymd_opt(2024, 10, 24).unwrap());
        assert_eq!(stats.present, 1);
        assert_eq!(stats.late, 1);
        assert_eq!(stats.absent, 1);
        // 2 of 3 attended
        assert_eq!(stats.attendance_rate, 67);
    }

    #[test]
    fn update_validates_clock_times() {
        let mut data = demo_data();
        let id = data.attendance[0].id;

        let bad = UpdateAttendanceRequest { clock_in: Some("9am".into()), ..Default::default() };
        assert!(matches!(AttendanceService::update(&mut data, id, bad), Err(AppError::Validation(_))));

        let good = UpdateAttendanceRequest {
            clock_in: Some("08:45".into()),
            status: Some(AttendanceStatus::HalfDay),
            ..Default::default()
        };
        let updated = AttendanceService::update(&mut data, id, good).unwrap();
        assert_eq!(updated.clock_in, "08:45");
        assert_eq!(updated.status, AttendanceStatus::HalfDay);
    }

    #[test]
    fn recent_is_newest_first() {
        let data = demo_data();
        let recent = AttendanceService::recent_for(&data, "EMP001", 5);
        assert_eq!(recent.len(), 2);
        assert!(recent[0].date > recent[1].date);
    }
}

use crate::{error::SourceError, source::DataSource};
use async_trait::async_trait;
use chrono::{Days, NaiveDate, NaiveDateTime};
use model::{
    core::{data_type::DataType, value::Value},
    records::buffer::{Column, TabularBuffer},
};
use std::time::Duration;
use tracing::{debug, info};

/// Simulated database latency, so progress reporting is exercised the same
/// way it is against a live source.
const MOCK_QUERY_DELAY: Duration = Duration::from_millis(500);

/// Deterministic source connector for integration runs without a live
/// database. The returned table is picked by case-insensitive substring
/// matching on the query text; unmatched queries get a small generic table.
/// All values are fixed or derived from row indices, so repeated reads of
/// the same query yield identical buffers.
pub struct MockDataSource;

#[async_trait]
impl DataSource for MockDataSource {
    async fn read_query(
        &self,
        query: &str,
        task_name: &str,
    ) -> Result<TabularBuffer, SourceError> {
        info!("[{task_name}] executing query against the mock source");
        debug!("[{task_name}] query: {query}");

        tokio::time::sleep(MOCK_QUERY_DELAY).await;

        let upper = query.to_uppercase();
        let buffer = if upper.contains("DEPARTMENTS") {
            departments()
        } else if upper.contains("DOCTORS") {
            doctors()
        } else if upper.contains("WARDS") {
            wards()
        } else if upper.contains("STAFF") {
            staff()
        } else if upper.contains("PERMISSIONS") {
            permissions()
        } else if upper.contains("OUTPATIENT_RECORDS") {
            outpatient_records()
        } else if upper.contains("INPATIENT_RECORDS") {
            inpatient_records()
        } else if upper.contains("SALES") {
            sales()
        } else if upper.contains("MESSAGES") {
            messages()
        } else {
            generic()
        };

        info!("[{task_name}] mock source produced {} rows", buffer.row_count());
        Ok(buffer)
    }
}

/// Fixed reference instant all mock timestamps are derived from.
fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn days_ago(days: u64) -> NaiveDateTime {
    epoch().checked_sub_days(Days::new(days)).unwrap_or_default()
}

/// Index-derived stand-in for the varied counts a real table would hold.
fn spread(seed: usize, lo: i64, hi: i64) -> i64 {
    lo + ((seed as i64).wrapping_mul(31).wrapping_add(7)) % (hi - lo)
}

fn int(v: i64) -> Option<Value> {
    Some(Value::Int(v as i32))
}

fn text(v: &str) -> Option<Value> {
    Some(Value::Text(v.to_string()))
}

fn ts(v: NaiveDateTime) -> Option<Value> {
    Some(Value::Timestamp(v))
}

fn departments() -> TabularBuffer {
    let columns = vec![
        Column::new("ID", DataType::Int),
        Column::new("CODE", DataType::Text),
        Column::new("NAME", DataType::Text),
        Column::new("DISPLAY_ORDER", DataType::Int),
        Column::new("CREATED_AT", DataType::Timestamp),
    ];
    let rows = [
        (1, "INT", "Internal Medicine", 360),
        (2, "SUR", "Surgery", 360),
        (3, "PED", "Pediatrics", 330),
        (4, "ORT", "Orthopedics", 300),
        (5, "DER", "Dermatology", 270),
    ]
    .into_iter()
    .map(|(id, code, name, age)| vec![int(id), text(code), text(name), int(id), ts(days_ago(age))])
    .collect();
    TabularBuffer { columns, rows }
}

fn doctors() -> TabularBuffer {
    let columns = vec![
        Column::new("CODE", DataType::Text),
        Column::new("NAME", DataType::Text),
        Column::new("DEPARTMENT_CODE", DataType::Text),
        Column::new("DISPLAY_ORDER", DataType::Int),
        Column::new("CREATED_AT", DataType::Timestamp),
    ];
    let rows = [
        ("D001", "Taro Tanaka", "INT"),
        ("D002", "Hanako Suzuki", "INT"),
        ("D003", "Jiro Sato", "SUR"),
        ("D004", "Saburo Takahashi", "PED"),
        ("D005", "Shiro Yamamoto", "ORT"),
        ("D006", "Goro Watanabe", "DER"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (code, name, dept))| {
        vec![
            text(code),
            text(name),
            text(dept),
            int(i as i64 + 1),
            ts(days_ago(300 - 30 * i as u64)),
        ]
    })
    .collect();
    TabularBuffer { columns, rows }
}

fn wards() -> TabularBuffer {
    let columns = vec![
        Column::new("ID", DataType::Int),
        Column::new("CODE", DataType::Text),
        Column::new("NAME", DataType::Text),
        Column::new("CAPACITY", DataType::Int),
        Column::new("DISPLAY_ORDER", DataType::Int),
        Column::new("CREATED_AT", DataType::Timestamp),
    ];
    let rows = [
        (1, "W01", "General Ward A", 50, 360),
        (2, "W02", "General Ward B", 40, 360),
        (3, "ICU", "Intensive Care Unit", 10, 360),
        (4, "W03", "Pediatric Ward", 30, 330),
    ]
    .into_iter()
    .map(|(id, code, name, capacity, age)| {
        vec![
            int(id),
            text(code),
            text(name),
            int(capacity),
            int(id),
            ts(days_ago(age)),
        ]
    })
    .collect();
    TabularBuffer { columns, rows }
}

fn staff() -> TabularBuffer {
    let columns = vec![
        Column::new("ID", DataType::Text),
        Column::new("NAME", DataType::Text),
        Column::new("JOB_TYPE_CODE", DataType::Text),
        Column::new("CREATED_AT", DataType::Timestamp),
    ];
    let rows = [
        ("S001", "Nurse A", "01"),
        ("S002", "Nurse B", "01"),
        ("S003", "Pharmacist A", "02"),
        ("S004", "Radiographer A", "03"),
        ("S005", "Lab Technician A", "04"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (id, name, job))| {
        vec![text(id), text(name), text(job), ts(days_ago(300 - 30 * i as u64))]
    })
    .collect();
    TabularBuffer { columns, rows }
}

fn permissions() -> TabularBuffer {
    let columns = vec![
        Column::new("JOB_TYPE_CODE", DataType::Text),
        Column::new("JOB_TYPE_NAME", DataType::Text),
        Column::new("LEVEL", DataType::Int),
    ];
    let rows = [
        ("01", "Nurse", 2),
        ("02", "Pharmacist", 2),
        ("03", "Radiographer", 2),
        ("04", "Lab Technician", 2),
        ("05", "Clerk", 1),
    ]
    .into_iter()
    .map(|(code, name, level)| vec![text(code), text(name), int(level)])
    .collect();
    TabularBuffer { columns, rows }
}

fn outpatient_records() -> TabularBuffer {
    let columns = vec![
        Column::new("ID", DataType::Int),
        Column::new("DATE", DataType::Timestamp),
        Column::new("DEPARTMENT_ID", DataType::Int),
        Column::new("NEW_PATIENTS_COUNT", DataType::Int),
        Column::new("RETURNING_PATIENTS_COUNT", DataType::Int),
        Column::new("CREATED_AT", DataType::Timestamp),
    ];
    let mut rows = Vec::new();
    for day in 0..30u64 {
        let date = days_ago(30 - day);
        for dept_id in 1..=5u64 {
            let seed = (day * 5 + dept_id) as usize;
            rows.push(vec![
                int(seed as i64),
                ts(date),
                int(dept_id as i64),
                int(spread(seed, 5, 20)),
                int(spread(seed * 7, 20, 50)),
                ts(date),
            ]);
        }
    }
    TabularBuffer { columns, rows }
}

fn inpatient_records() -> TabularBuffer {
    let columns = vec![
        Column::new("ID", DataType::Int),
        Column::new("DATE", DataType::Timestamp),
        Column::new("WARD_ID", DataType::Int),
        Column::new("DEPARTMENT_ID", DataType::Int),
        Column::new("CURRENT_PATIENT_COUNT", DataType::Int),
        Column::new("NEW_ADMISSION_COUNT", DataType::Int),
        Column::new("DISCHARGE_COUNT", DataType::Int),
        Column::new("TRANSFER_OUT_COUNT", DataType::Int),
        Column::new("TRANSFER_IN_COUNT", DataType::Int),
        Column::new("CREATED_AT", DataType::Timestamp),
    ];
    let mut rows = Vec::new();
    for day in 0..30u64 {
        let date = days_ago(30 - day);
        for ward_id in 1..=4u64 {
            let seed = (day * 4 + ward_id) as usize;
            rows.push(vec![
                int(seed as i64),
                ts(date),
                int(ward_id as i64),
                int(spread(seed, 1, 6)),
                int(spread(seed * 3, 30, 50)),
                int(spread(seed * 5, 0, 5)),
                int(spread(seed * 7, 0, 5)),
                int(spread(seed * 11, 0, 3)),
                int(spread(seed * 13, 0, 3)),
                ts(date),
            ]);
        }
    }
    TabularBuffer { columns, rows }
}

fn sales() -> TabularBuffer {
    let columns = vec![
        Column::new("DOCTOR_CODE", DataType::Text),
        Column::new("YEAR_MONTH", DataType::Text),
        Column::new("OUTPATIENT_SALES", DataType::BigInt),
        Column::new("INPATIENT_SALES", DataType::BigInt),
        Column::new("UPDATED_AT", DataType::Timestamp),
    ];
    let doctors = ["D001", "D002", "D003", "D004", "D005", "D006"];
    let mut rows = Vec::new();
    for months_back in 0..12i32 {
        let (mut year, mut month) = (2024, 6 - months_back);
        if month <= 0 {
            month += 12;
            year -= 1;
        }
        let year_month = format!("{year:04}-{month:02}");
        let updated = NaiveDate::from_ymd_opt(year, month as u32, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        for (i, code) in doctors.iter().enumerate() {
            let seed = months_back as usize * doctors.len() + i;
            rows.push(vec![
                text(code),
                text(&year_month),
                Some(Value::BigInt(spread(seed, 1_000_000, 5_000_000))),
                Some(Value::BigInt(spread(seed * 17, 2_000_000, 8_000_000))),
                ts(updated),
            ]);
        }
    }
    TabularBuffer { columns, rows }
}

fn messages() -> TabularBuffer {
    let columns = vec![
        Column::new("ID", DataType::Int),
        Column::new("CONTENT", DataType::Text),
        Column::new("CREATED_AT", DataType::Timestamp),
    ];
    let rows = [
        (1, "Scheduled system maintenance notice", 7),
        (2, "Introduction of the new electronic chart system", 5),
        (3, "Year-end and New Year clinic schedule", 3),
        (4, "Reinforced infection control measures", 1),
    ]
    .into_iter()
    .map(|(id, content, age)| vec![int(id), text(content), ts(days_ago(age))])
    .collect();
    TabularBuffer { columns, rows }
}

fn generic() -> TabularBuffer {
    let columns = vec![
        Column::new("ID", DataType::Int),
        Column::new("NAME", DataType::Text),
        Column::new("CREATED_AT", DataType::Timestamp),
    ];
    let rows = (1..=3)
        .map(|id| vec![int(id), text(&format!("Sample record {id}")), ts(epoch())])
        .collect();
    TabularBuffer { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn repeated_reads_of_the_same_query_are_identical() {
        let source = MockDataSource;
        let first = source
            .read_query("SELECT * FROM SALES", "sales")
            .await
            .unwrap();
        let second = source
            .read_query("SELECT * FROM SALES", "sales")
            .await
            .unwrap();

        assert_eq!(first.columns, second.columns);
        assert_eq!(first.row_count(), second.row_count());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn table_matching_is_case_insensitive_substring() {
        let source = MockDataSource;
        let buffer = source
            .read_query("select id, code, name from departments", "departments")
            .await
            .unwrap();
        assert_eq!(buffer.row_count(), 5);
        assert_eq!(buffer.columns[0].name, "ID");
    }

    #[tokio::test]
    async fn unmatched_queries_get_the_generic_table() {
        let source = MockDataSource;
        let buffer = source
            .read_query("SELECT 1 FROM DUAL", "probe")
            .await
            .unwrap();
        assert_eq!(buffer.row_count(), 3);
        assert_eq!(buffer.column_names(), vec!["ID", "NAME", "CREATED_AT"]);
    }

    #[test]
    fn every_mock_table_satisfies_the_buffer_invariant() {
        for buffer in [
            departments(),
            doctors(),
            wards(),
            staff(),
            permissions(),
            outpatient_records(),
            inpatient_records(),
            sales(),
            messages(),
            generic(),
        ] {
            let mut check = TabularBuffer::new(buffer.columns.clone());
            for row in &buffer.rows {
                check.push_row(row.clone()).unwrap();
            }
            assert_eq!(check.row_count(), buffer.row_count());
        }
    }

    #[test]
    fn record_volumes_match_the_reference_tables() {
        assert_eq!(outpatient_records().row_count(), 150);
        assert_eq!(inpatient_records().row_count(), 120);
        assert_eq!(sales().row_count(), 72);
        assert_eq!(wards().row_count(), 4);

        let departments = departments();
        let first_id = departments.rows[0][0].as_ref().and_then(|v| v.as_i64());
        assert_eq!(first_id, Some(1));
        let first_code = departments.rows[0][1].as_ref().and_then(|v| v.as_string());
        assert_eq!(first_code.as_deref(), Some("INT"));
    }
}

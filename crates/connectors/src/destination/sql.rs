//! Statement rendering for the Postgres destination.

use model::records::buffer::Column;

/// Double-quote an identifier, preserving case and escaping embedded quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Idempotent table provisioning statement whose column list mirrors the
/// buffer's columns in order.
pub fn build_create_table(table: &str, columns: &[Column]) -> String {
    let column_list = columns
        .iter()
        .map(|c| format!("{} {}", quote_identifier(&c.name), c.data_type.postgres_name()))
        .collect::<Vec<String>>()
        .join(", ");

    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote_identifier(table),
        column_list
    )
}

/// Multi-row insert with one `$n` placeholder per cell, row-major.
pub fn build_insert(table: &str, columns: &[Column], row_count: usize) -> String {
    let quoted_columns = columns
        .iter()
        .map(|c| quote_identifier(&c.name))
        .collect::<Vec<String>>()
        .join(", ");

    let mut sql = format!(
        "INSERT INTO {} ({}) VALUES ",
        quote_identifier(table),
        quoted_columns
    );

    let mut placeholder = 1;
    for row in 0..row_count {
        if row > 0 {
            sql.push_str(", ");
        }
        sql.push('(');
        for column in 0..columns.len() {
            if column > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&format!("${placeholder}"));
            placeholder += 1;
        }
        sql.push(')');
    }
    sql
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::data_type::DataType;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("ID", DataType::Int),
            Column::new("NAME", DataType::Text),
        ]
    }

    #[test]
    fn create_table_quotes_every_identifier() {
        let sql = build_create_table("departments", &columns());
        assert_eq!(
            sql,
            r#"CREATE TABLE IF NOT EXISTS "departments" ("ID" INTEGER, "NAME" TEXT)"#
        );
    }

    #[test]
    fn create_table_escapes_embedded_quotes() {
        let sql = build_create_table(
            "odd\"name",
            &[Column::new("a\"b", DataType::Boolean)],
        );
        assert_eq!(
            sql,
            r#"CREATE TABLE IF NOT EXISTS "odd""name" ("a""b" BOOLEAN)"#
        );
    }

    #[test]
    fn insert_numbers_placeholders_row_major() {
        let sql = build_insert("departments", &columns(), 2);
        assert_eq!(
            sql,
            r#"INSERT INTO "departments" ("ID", "NAME") VALUES ($1, $2), ($3, $4)"#
        );
    }

    #[test]
    fn insert_with_a_single_row_has_one_group() {
        let sql = build_insert("t", &columns(), 1);
        assert_eq!(sql, r#"INSERT INTO "t" ("ID", "NAME") VALUES ($1, $2)"#);
    }
}

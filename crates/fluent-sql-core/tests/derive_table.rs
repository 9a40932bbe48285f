//! Tests for the `#[derive(Table)]` macro output.

mod common;

use common::{sql, text, DepartmentTable, Employee, EmployeeTable};
use fluent_sql_core::{AsTable, Scalar, SqlPart, SqlToken};

#[test]
fn test_table_constants() {
    assert_eq!(EmployeeTable::NAME, "employees");
    assert_eq!(
        EmployeeTable::COLUMNS,
        &["id", "name", "age", "salary", "department_id"]
    );
    assert_eq!(DepartmentTable::COLUMNS, &["id", "title"]);
}

#[test]
fn test_new_is_aliased_by_its_name() {
    let employees = Employee::table();
    assert_eq!(employees.as_table().raw_name(), "employees");
    assert_eq!(employees.as_table().alias(), "employees");
    assert_eq!(
        sql().render(&employees.relation()).unwrap().0,
        r#""employees""#
    );
}

#[test]
fn test_column_name_attribute() {
    let departments = DepartmentTable::aliased("d");
    assert_eq!(departments.name.name(), "title");
    assert_eq!(
        departments.name.tokens(),
        vec![SqlToken::QualifiedIdentifier("d".into(), "title".into())]
    );
}

#[test]
fn test_columns_remember_their_table() {
    let employees = EmployeeTable::aliased("e");
    let table = employees.salary.table().unwrap();
    assert_eq!(table.raw_name(), "employees");
    assert_eq!(table.alias(), "e");
}

#[test]
fn test_select_all_columns() {
    let employees = EmployeeTable::aliased("e");
    let statement = sql()
        .select()
        .from(&employees)
        .select_exprs(employees.all_columns());
    assert_eq!(
        text(&statement),
        concat!(
            r#"SELECT "e"."id" , "e"."name" , "e"."age" , "e"."salary" , "e"."department_id" "#,
            r#"FROM "employees" AS "e""#
        )
    );
}

#[test]
fn test_typed_relation_joins() {
    let employees = EmployeeTable::aliased("e");
    let departments = DepartmentTable::aliased("d");
    let joined = employees
        .relation()
        .inner_join(
            &departments,
            employees
                .department_id
                .equal(departments.id.force_cast::<Scalar<Option<i64>>>()),
        );
    let statement = sql()
        .select()
        .from(joined)
        .select(&[&employees.name, &departments.name]);
    assert_eq!(
        text(&statement),
        concat!(
            r#"SELECT "e"."name" , "d"."title" FROM "employees" AS "e" "#,
            r#"INNER JOIN "departments" AS "d" ON "e"."department_id" = "d"."id""#
        )
    );
}

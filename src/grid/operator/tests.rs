use std::rc::Rc;
use std::sync::Arc;

use super::*;
use crate::domain::{PropertyInfo, Record, TypeDescriptor};
use crate::grid::{CollectionChange, SortDirection};

fn person_type() -> Arc<TypeDescriptor> {
    Arc::new(
        TypeDescriptor::new("Person")
            .with_property(PropertyInfo::new("Name", ValueType::Text))
            .with_property(PropertyInfo::new("Age", ValueType::Integer)),
    )
}

fn people() -> ItemList {
    let ty = person_type();
    let person = |name: &str, age: i64| {
        Record::new(Arc::clone(&ty))
            .with("Name", name)
            .with("Age", age)
    };
    ItemList::records(
        Arc::clone(&ty),
        [person("Ann", 41), person("Bob", 25), person("Cid", 33)],
    )
}

fn people_grid() -> DataGrid {
    let mut grid = DataGrid::default();
    grid.set_items_source(people());
    grid
}

fn text(value: &str) -> Option<Value> {
    Some(Value::from(value))
}

fn names(grid: &DataGrid) -> Vec<Option<String>> {
    grid.property_definitions()
        .iter()
        .map(|pd| pd.property_name.clone())
        .collect()
}

fn operator(grid: &DataGrid) -> Rc<dyn DataGridOperator> {
    Rc::clone(grid.operator().expect("source bound"))
}

#[test]
fn test_scalar_list_scenario() {
    let mut grid = DataGrid::default();
    grid.set_items_source(ItemList::scalars(ValueType::Text, ["a", "b", "c"]));

    assert_eq!(grid.row_count(), 3);
    assert_eq!(grid.column_count(), 1);
    assert_eq!(grid.cell_value(CellRef::new(1, 0)), text("b"));
    assert_eq!(grid.binding_path(CellRef::new(1, 0)).as_deref(), Some("[1]"));

    assert_eq!(grid.insert_item(1), Some(1));
    assert_eq!(grid.row_count(), 4);
    assert_eq!(grid.cell_value(CellRef::new(1, 0)), text(""));
    assert_eq!(grid.cell_value(CellRef::new(2, 0)), text("b"));
}

#[test]
fn test_object_list_scenario() {
    let mut grid = people_grid();

    assert_eq!(grid.column_count(), 2);
    assert_eq!(
        names(&grid),
        vec![Some("Name".to_string()), Some("Age".to_string())]
    );
    assert_eq!(grid.binding_path(CellRef::new(0, 1)).as_deref(), Some("Age"));

    assert!(grid.try_set_cell_value(CellRef::new(0, 1), 30));
    assert_eq!(grid.cell_value(CellRef::new(0, 1)), Some(Value::Integer(30)));
}

#[test]
fn test_single_object_scenario() {
    let mut grid = DataGrid::default();
    grid.set_items_source(ItemsSource::object(point()));
    let op = operator(&grid);

    assert_eq!(grid.row_count(), 2);
    assert_eq!(grid.column_count(), 1);
    assert_eq!(grid.cell_value(CellRef::new(1, 0)), Some(Value::Integer(2)));
    assert_eq!(grid.cell_value(CellRef::new(0, 1)), None);
    assert_eq!(grid.binding_path(CellRef::new(0, 0)).as_deref(), Some("X"));

    assert!(!op.can_insert_rows(&grid));
    assert!(!op.can_delete_rows(&grid));
    assert!(!op.can_insert_columns(&grid));
    assert!(!op.can_delete_columns(&grid));
    assert_eq!(grid.insert_rows(0, 1), 0);
    assert_eq!(grid.delete_rows(0, 1), 0);
    assert_eq!(grid.insert_item(0), None);
    assert!(!grid.sort_by(0, SortDirection::Ascending));
    assert_eq!(grid.row_count(), 2);

    assert_eq!(op.get_items_source_index(&grid, 0), Some(0));
    assert_eq!(op.get_items_source_index(&grid, 1), None);

    assert!(grid.try_set_cell_value(CellRef::new(0, 0), "5"));
    assert_eq!(grid.cell_value(CellRef::new(0, 0)), Some(Value::Integer(5)));
}

#[test]
fn test_index_inverse_law_under_sort_and_filter() {
    let mut grid = DataGrid::default();
    grid.set_items_source(ItemList::scalars(ValueType::Integer, [5, 3, 8, 3, 1, 9]));
    assert!(grid.sort_by(0, SortDirection::Descending));
    grid.set_filter(|item| {
        item.as_value()
            .and_then(Value::as_integer)
            .is_some_and(|n| n > 2)
    });
    let op = operator(&grid);

    assert_eq!(grid.row_count(), 5);
    for v in 0..grid.row_count() {
        let s = op.get_items_source_index(&grid, v).expect("visible row");
        assert_eq!(op.get_collection_view_index(&grid, s), Some(v));
    }
    // filtered out
    assert_eq!(op.get_collection_view_index(&grid, 4), None);
    assert_eq!(grid.cell_value(CellRef::new(0, 0)), Some(Value::Integer(9)));
    assert_eq!(grid.binding_path(CellRef::new(0, 0)).as_deref(), Some("[5]"));
}

#[test]
fn test_identity_without_sort_or_filter() {
    let grid = people_grid();
    let op = operator(&grid);
    for i in 0..3 {
        assert_eq!(op.get_items_source_index(&grid, i), Some(i));
        assert_eq!(op.get_collection_view_index(&grid, i), Some(i));
    }
    assert_eq!(op.get_items_source_index(&grid, 3), None);
}

#[test]
fn test_write_then_read_returns_converted_value() {
    let mut grid = people_grid();

    assert!(grid.try_set_cell_value(CellRef::new(1, 0), "Zed"));
    assert_eq!(grid.cell_value(CellRef::new(1, 0)), text("Zed"));

    assert!(grid.try_set_cell_value(CellRef::new(2, 1), " 44 "));
    assert_eq!(grid.cell_value(CellRef::new(2, 1)), Some(Value::Integer(44)));
}

#[test]
fn test_insert_then_delete_restores_rows() {
    let mut grid = people_grid();

    assert_eq!(grid.insert_rows(1, 2), 2);
    assert_eq!(grid.row_count(), 5);
    assert_eq!(grid.cell_value(CellRef::new(1, 0)), text(""));
    assert_eq!(grid.cell_value(CellRef::new(3, 0)), text("Bob"));

    assert_eq!(grid.delete_rows(1, 2), 2);
    assert_eq!(grid.row_count(), 3);
    let column: Vec<_> = (0..3)
        .filter_map(|r| grid.cell_value(CellRef::new(r, 0)))
        .collect();
    assert_eq!(
        column,
        vec![Value::from("Ann"), Value::from("Bob"), Value::from("Cid")]
    );
}

#[test]
fn test_insert_at_end_appends() {
    let mut grid = people_grid();
    assert_eq!(grid.insert_item(3), Some(3));
    assert_eq!(grid.row_count(), 4);
    assert_eq!(grid.insert_item(9), None);
}

#[test]
fn test_bulk_delete_is_clamped() {
    let mut grid = DataGrid::default();
    grid.set_items_source(ItemList::scalars(ValueType::Integer, [1, 2, 3, 4, 5]));

    assert_eq!(grid.delete_rows(3, 10), 2);
    assert_eq!(grid.row_count(), 3);
    assert_eq!(grid.delete_rows(3, 1), 0);
    assert_eq!(grid.delete_rows(0, 0), 0);
    assert_eq!(grid.row_count(), 3);
}

#[test]
fn test_delete_follows_display_order() {
    let mut grid = DataGrid::default();
    grid.set_items_source(ItemList::scalars(ValueType::Integer, [5, 3, 8]));
    assert!(grid.sort_by(0, SortDirection::Ascending));

    // display rows 0 and 1 hold 3 and 5
    assert_eq!(grid.delete_rows(0, 2), 2);
    assert_eq!(grid.row_count(), 1);
    assert_eq!(grid.cell_value(CellRef::new(0, 0)), Some(Value::Integer(8)));
}

#[test]
fn test_fixed_size_list_rejects_structural_edits() {
    let mut grid = DataGrid::default();
    grid.set_items_source(ItemList::scalars(ValueType::Integer, [1, 2]).fixed_size());
    let op = operator(&grid);

    assert!(!op.can_insert_rows(&grid));
    assert!(!op.can_delete_rows(&grid));
    assert_eq!(grid.insert_rows(0, 1), 0);
    assert_eq!(grid.insert_item(0), None);
    assert_eq!(grid.delete_rows(0, 1), 0);
    assert_eq!(grid.row_count(), 2);

    // elements stay editable
    assert!(grid.try_set_cell_value(CellRef::new(0, 0), 7));
}

#[test]
fn test_type_without_default_constructor_cannot_insert() {
    let ty = Arc::new(
        TypeDescriptor::new("Handle")
            .with_property(PropertyInfo::new("Id", ValueType::Integer))
            .without_default_constructor(),
    );
    let list = ItemList::records(Arc::clone(&ty), [Record::new(Arc::clone(&ty))]);
    let mut grid = DataGrid::default();
    grid.set_items_source(list);
    let op = operator(&grid);

    assert!(!op.can_insert_rows(&grid));
    assert!(op.can_delete_rows(&grid));
    assert_eq!(grid.insert_rows(0, 1), 0);
    assert_eq!(grid.row_count(), 1);
}

#[test]
fn test_settings_disable_structural_edits() {
    let settings = GridSettings {
        can_insert: false,
        can_delete: false,
        ..GridSettings::default()
    };
    let mut grid = DataGrid::new(settings);
    grid.set_items_source(people());
    let op = operator(&grid);

    assert!(!op.can_insert_rows(&grid));
    assert!(!op.can_delete_rows(&grid));
    assert_eq!(grid.delete_rows(0, 1), 0);
}

#[test]
fn test_transposed_object_list() {
    let settings = GridSettings {
        items_in_rows: false,
        ..GridSettings::default()
    };
    let mut grid = DataGrid::new(settings);
    grid.set_items_source(people());
    let op = operator(&grid);

    assert_eq!(grid.row_count(), 2);
    assert_eq!(grid.column_count(), 3);
    assert_eq!(grid.cell_value(CellRef::new(1, 2)), Some(Value::Integer(33)));
    assert_eq!(grid.binding_path(CellRef::new(1, 0)).as_deref(), Some("Age"));

    assert!(op.can_insert_columns(&grid));
    assert!(!op.can_insert_rows(&grid));
    assert_eq!(grid.insert_columns(3, 1), 1);
    assert_eq!(grid.column_count(), 4);
    assert_eq!(grid.delete_columns(0, 2), 2);
    assert_eq!(grid.column_count(), 2);
    assert_eq!(grid.cell_value(CellRef::new(0, 0)), text("Cid"));
}

#[test]
fn test_switching_orientation_swaps_dimensions() {
    let mut grid = people_grid();
    grid.set_items_in_rows(false);
    assert_eq!((grid.row_count(), grid.column_count()), (2, 3));
    grid.set_items_in_rows(true);
    assert_eq!((grid.row_count(), grid.column_count()), (3, 2));
}

#[test]
fn test_dynamic_rows_insert_and_delete_properties() {
    let source =
        ItemsSource::from_json_str(r#"[{"a": 1, "b": 2}, {"a": 3}]"#).expect("valid json");
    let mut grid = DataGrid::default();
    grid.set_items_source(source);
    let op = operator(&grid);

    assert_eq!(grid.column_count(), 2);
    assert_eq!(grid.cell_value(CellRef::new(1, 1)), Some(Value::Null));
    assert!(op.can_insert_columns(&grid));

    assert_eq!(grid.insert_columns(1, 2), 2);
    assert_eq!(
        names(&grid),
        vec![
            Some("a".to_string()),
            Some("Column1".to_string()),
            Some("Column2".to_string()),
            Some("b".to_string()),
        ]
    );
    assert_eq!(grid.cell_value(CellRef::new(0, 1)), Some(Value::Null));
    assert!(grid.try_set_cell_value(CellRef::new(0, 1), "x"));
    assert_eq!(grid.cell_value(CellRef::new(0, 1)), text("x"));

    // new rows get a slot for every property
    assert_eq!(grid.insert_rows(2, 1), 1);
    let list = grid.items_list().expect("list bound");
    let fresh = list
        .get(2)
        .and_then(|item| item.as_record())
        .expect("record");
    assert_eq!(fresh.len(), 4);

    assert_eq!(grid.delete_columns(1, 2), 2);
    assert_eq!(
        names(&grid),
        vec![Some("a".to_string()), Some("b".to_string())]
    );
    let list = grid.items_list().expect("list bound");
    assert!(list.records_iter().all(|r| r.get("Column1").is_none()));
}

#[test]
fn test_non_deletable_definition_is_skipped() {
    let source = ItemsSource::from_json_str(r#"[{"a": 1, "b": 2, "c": 3}]"#).expect("valid json");
    let mut grid = DataGrid::default();
    grid.set_items_source(source);
    grid.property_definitions_mut()[1].can_delete = false;
    grid.update_property_definitions();

    assert_eq!(grid.delete_columns(0, 3), 2);
    assert_eq!(names(&grid), vec![Some("b".to_string())]);
}

#[test]
fn test_typed_rows_cannot_insert_properties() {
    let mut grid = people_grid();
    let op = operator(&grid);
    assert!(!op.can_insert_columns(&grid));
    assert!(!op.can_delete_columns(&grid));
    assert_eq!(grid.insert_columns(0, 1), 0);
    assert_eq!(grid.column_count(), 2);
}

#[test]
fn test_set_value_skips_read_only() {
    let ty = Arc::new(
        TypeDescriptor::new("Account")
            .with_property(PropertyInfo::new("Id", ValueType::Integer).read_only())
            .with_property(PropertyInfo::new("Balance", ValueType::Float)),
    );
    let account = Record::new(Arc::clone(&ty)).with("Id", 7).with("Balance", 1.5);
    let mut grid = DataGrid::default();
    grid.set_items_source(ItemList::records(ty, [account]));

    assert!(grid.set_value(CellRef::new(0, 0), 99).is_ok());
    assert_eq!(grid.cell_value(CellRef::new(0, 0)), Some(Value::Integer(7)));
    assert!(!grid.try_set_cell_value(CellRef::new(0, 0), 99));

    assert!(grid.set_value(CellRef::new(0, 1), 2).is_ok());
    assert_eq!(grid.cell_value(CellRef::new(0, 1)), Some(Value::Float(2.0)));
}

#[test]
fn test_read_only_definition_blocks_writes() {
    let mut grid = DataGrid::default();
    grid.set_property_definitions(vec![PropertyDefinition::new("Name").read_only()]);
    grid.set_items_source(people());

    assert!(!grid.try_set_cell_value(CellRef::new(0, 0), "Zed"));
    assert!(grid.set_value(CellRef::new(0, 0), "Zed").is_ok());
    assert_eq!(grid.cell_value(CellRef::new(0, 0)), text("Ann"));
}

#[test]
fn test_bad_conversion_is_rejected() {
    let mut grid = people_grid();
    assert!(!grid.try_set_cell_value(CellRef::new(0, 1), "not a number"));
    assert_eq!(grid.cell_value(CellRef::new(0, 1)), Some(Value::Integer(41)));
    assert!(grid.set_value(CellRef::new(0, 1), "not a number").is_err());
    assert!(!grid.try_set_cell_value(CellRef::new(10, 0), "x"));
}

#[test]
fn test_each_edit_notifies_once() {
    let mut grid = DataGrid::default();
    let rx = grid.subscribe();
    grid.set_items_source(people());
    assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![CollectionChange::Reset]);

    assert_eq!(grid.insert_rows(0, 2), 2);
    assert_eq!(
        rx.try_iter().collect::<Vec<_>>(),
        vec![CollectionChange::ItemsInserted { index: 0, count: 2 }]
    );

    assert_eq!(grid.delete_rows(0, 2), 2);
    assert_eq!(
        rx.try_iter().collect::<Vec<_>>(),
        vec![CollectionChange::ItemsRemoved {
            indices: vec![0, 1]
        }]
    );

    assert!(grid.try_set_cell_value(CellRef::new(2, 0), "Cy"));
    assert_eq!(
        rx.try_iter().collect::<Vec<_>>(),
        vec![CollectionChange::ItemReplaced { index: 2 }]
    );

    // rejected writes are silent
    assert!(!grid.try_set_cell_value(CellRef::new(0, 1), "x"));
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_operator_shared_between_grids() {
    let shared: Rc<dyn DataGridOperator> = Rc::new(ObjectListOperator::new(16));
    let mut first = DataGrid::default();
    let mut second = DataGrid::default();
    first
        .set_items_source_with(people(), Rc::clone(&shared))
        .expect("shape matches");

    let ty = person_type();
    let other = ItemList::records(
        Arc::clone(&ty),
        [Record::new(ty).with("Name", "Dee").with("Age", 50)],
    );
    second
        .set_items_source_with(other, Rc::clone(&shared))
        .expect("shape matches");

    assert_eq!(first.row_count(), 3);
    assert_eq!(second.row_count(), 1);
    assert_eq!(first.cell_value(CellRef::new(0, 0)), text("Ann"));
    assert_eq!(second.cell_value(CellRef::new(0, 0)), text("Dee"));

    let mismatched = second.set_items_source_with(
        ItemList::scalars(ValueType::Integer, [1]),
        Rc::clone(&shared),
    );
    assert!(mismatched.is_err());
    assert_eq!(second.row_count(), 1);
}

#[test]
fn test_user_definitions_survive_auto_generation() {
    let mut grid = DataGrid::default();
    grid.set_property_definitions(vec![PropertyDefinition::new("Age").header("Years")]);
    grid.set_items_source(people());

    assert_eq!(
        names(&grid),
        vec![Some("Age".to_string()), Some("Name".to_string())]
    );
    assert_eq!(grid.property_definitions()[0].display_name(), "Years");
    assert!(!grid.property_definitions()[0].is_auto_generated());

    // rebinding regenerates the same set
    grid.set_items_source(people());
    assert_eq!(grid.property_definitions().len(), 2);

    grid.clear_items_source();
    assert_eq!(grid.row_count(), 0);
    assert_eq!(names(&grid), vec![Some("Age".to_string())]);
}

#[test]
fn test_unknown_property_definition() {
    let settings = GridSettings {
        auto_generate_columns: false,
        ..GridSettings::default()
    };
    let mut grid = DataGrid::new(settings);
    grid.set_property_definitions(vec![PropertyDefinition::new("Missing")]);
    grid.set_items_source(people());
    let op = operator(&grid);

    assert_eq!(grid.column_count(), 1);
    assert_eq!(grid.cell_value(CellRef::new(0, 0)), None);
    assert!(!grid.try_set_cell_value(CellRef::new(0, 0), "x"));
    assert!(!op.can_sort(&grid, 0));
    let pd = &grid.property_definitions()[0];
    assert!(op.get_property_descriptor(&grid, pd).is_none());
}

#[test]
fn test_sort_by_property() {
    let mut grid = people_grid();
    assert!(grid.sort_by(1, SortDirection::Ascending));
    assert_eq!(grid.cell_value(CellRef::new(0, 0)), text("Bob"));
    assert_eq!(grid.cell_value(CellRef::new(2, 0)), text("Ann"));

    // edits keep the view sorted
    assert!(grid.try_set_cell_value(CellRef::new(0, 1), 99));
    assert_eq!(grid.cell_value(CellRef::new(2, 0)), text("Bob"));

    grid.clear_sort();
    assert_eq!(grid.cell_value(CellRef::new(0, 0)), text("Ann"));
    assert!(!grid.sort_by(5, SortDirection::Ascending));
}

#[test]
fn test_unsortable_definition() {
    let mut grid = DataGrid::default();
    grid.set_property_definitions(vec![PropertyDefinition::new("Name").sortable(false)]);
    grid.set_items_source(people());
    assert!(!grid.sort_by(0, SortDirection::Ascending));
    assert!(grid.sort_by(1, SortDirection::Descending));
    assert_eq!(grid.cell_value(CellRef::new(0, 0)), text("Ann"));
}

#[test]
fn test_property_type_and_definition_override() {
    let mut grid = DataGrid::default();
    grid.set_property_definitions(vec![
        PropertyDefinition::new("Age").value_type(ValueType::Text),
    ]);
    grid.set_items_source(people());
    let op = operator(&grid);

    assert_eq!(op.get_property_type(&grid, CellRef::new(0, 0)), Some(ValueType::Text));
    assert_eq!(op.get_property_type(&grid, CellRef::new(0, 1)), Some(ValueType::Text));
    assert_eq!(op.get_property_type(&grid, CellRef::new(0, 9)), None);
}

#[test]
fn test_data_context_by_shape() {
    let mut grid = DataGrid::default();
    grid.set_items_source(ItemList::scalars(ValueType::Integer, [1, 2]));
    let op = operator(&grid);
    assert!(matches!(
        op.get_data_context(&grid, CellRef::new(1, 0)),
        Some(DataContext::List(list)) if list.len() == 2
    ));
    assert!(op.get_data_context(&grid, CellRef::new(2, 0)).is_none());

    let grid = people_grid();
    let op = operator(&grid);
    let item = op.get_item(&grid, CellRef::new(1, 0)).expect("item");
    assert_eq!(
        op.get_data_context(&grid, CellRef::new(1, 0)),
        Some(DataContext::Item(item))
    );
}

#[test]
fn test_element_binding_path_for_object_list() {
    let settings = GridSettings {
        auto_generate_columns: false,
        ..GridSettings::default()
    };
    let mut grid = DataGrid::new(settings);
    grid.set_property_definitions(vec![PropertyDefinition::for_element()]);
    grid.set_items_source(people());
    assert_eq!(grid.binding_path(CellRef::new(0, 0)).as_deref(), Some("."));
}

#[test]
fn test_select_operator_by_shape() {
    let settings = GridSettings::default();
    let scalars: ItemsSource = ItemList::scalars(ValueType::Integer, [1]).into();
    assert_eq!(
        select_operator(&scalars, &settings).shape(),
        SourceShape::ScalarList
    );
    let objects: ItemsSource = people().into();
    assert_eq!(
        select_operator(&objects, &settings).shape(),
        SourceShape::ObjectList
    );
    let single = ItemsSource::object(Record::new(person_type()));
    assert_eq!(
        select_operator(&single, &settings).shape(),
        SourceShape::SingleObject
    );
}

fn point() -> Record {
    let ty = Arc::new(
        TypeDescriptor::new("Point")
            .with_property(PropertyInfo::new("X", ValueType::Integer))
            .with_property(PropertyInfo::new("Y", ValueType::Integer)),
    );
    Record::new(ty).with("X", 1).with("Y", 2)
}

#[test]
fn test_single_object_transposed() {
    let settings = GridSettings {
        items_in_rows: false,
        ..GridSettings::default()
    };
    let mut grid = DataGrid::new(settings);
    grid.set_items_source(ItemsSource::object(point()));

    assert_eq!((grid.row_count(), grid.column_count()), (1, 2));
    assert_eq!(grid.cell_value(CellRef::new(0, 1)), Some(Value::Integer(2)));
    assert_eq!(grid.cell_value(CellRef::new(1, 0)), None);
    assert_eq!(grid.binding_path(CellRef::new(0, 1)).as_deref(), Some("Y"));
    assert!(grid.try_set_cell_value(CellRef::new(0, 0), 5));
    assert_eq!(grid.cell_value(CellRef::new(0, 0)), Some(Value::Integer(5)));
    assert!(!grid.sort_by(1, SortDirection::Ascending));
    assert_eq!(grid.insert_columns(0, 1), 0);
    assert_eq!(grid.delete_columns(0, 1), 0);

    grid.set_items_in_rows(true);
    assert_eq!((grid.row_count(), grid.column_count()), (2, 1));
    assert_eq!(grid.cell_value(CellRef::new(1, 0)), Some(Value::Integer(2)));
}

#[test]
fn test_shared_operator_keeps_descriptors_per_element_type() {
    let employee = Arc::new(
        TypeDescriptor::new("Employee").with_property(PropertyInfo::new("Age", ValueType::Text)),
    );
    let staff = ItemList::records(
        Arc::clone(&employee),
        [Record::new(Arc::clone(&employee)).with("Age", "forty")],
    );
    let definitions = vec![PropertyDefinition::new("Age")];
    let shared: Rc<dyn DataGridOperator> = Rc::new(ObjectListOperator::new(16));

    let mut first = DataGrid::default();
    first.set_property_definitions(definitions.clone());
    first
        .set_items_source_with(people(), Rc::clone(&shared))
        .expect("shape matches");
    let mut second = DataGrid::default();
    second.set_property_definitions(definitions);
    second
        .set_items_source_with(staff, Rc::clone(&shared))
        .expect("shape matches");

    assert!(!first.try_set_cell_value(CellRef::new(0, 0), "abc"));
    assert_eq!(first.cell_value(CellRef::new(0, 0)), Some(Value::Integer(41)));
    assert!(first.try_set_cell_value(CellRef::new(0, 0), "42"));
    assert_eq!(first.cell_value(CellRef::new(0, 0)), Some(Value::Integer(42)));

    assert!(second.try_set_cell_value(CellRef::new(0, 0), "abc"));
    assert_eq!(second.cell_value(CellRef::new(0, 0)), text("abc"));
}

#[test]
fn test_definition_type_does_not_override_declared_type() {
    let mut grid = DataGrid::default();
    grid.set_property_definitions(vec![
        PropertyDefinition::new("Age").value_type(ValueType::Text),
    ]);
    grid.set_items_source(people());

    assert!(!grid.try_set_cell_value(CellRef::new(0, 0), "abc"));
    assert_eq!(grid.cell_value(CellRef::new(0, 0)), Some(Value::Integer(41)));
    assert!(grid.try_set_cell_value(CellRef::new(0, 0), "52"));
    assert_eq!(grid.cell_value(CellRef::new(0, 0)), Some(Value::Integer(52)));
}

#[test]
fn test_definition_type_applies_to_loosely_typed_rows() {
    let source = ItemsSource::from_json_str(r#"[{"n": "1"}]"#).expect("valid json");
    let mut grid = DataGrid::default();
    grid.set_property_definitions(vec![
        PropertyDefinition::new("n").value_type(ValueType::Integer),
    ]);
    grid.set_items_source(source);

    assert!(grid.try_set_cell_value(CellRef::new(0, 0), "12"));
    assert_eq!(grid.cell_value(CellRef::new(0, 0)), Some(Value::Integer(12)));
    assert!(!grid.try_set_cell_value(CellRef::new(0, 0), "twelve"));
}

#[test]
fn test_scalar_definition_type_does_not_override_element_type() {
    let mut grid = DataGrid::default();
    grid.set_property_definitions(vec![
        PropertyDefinition::for_element().value_type(ValueType::Text),
    ]);
    grid.set_items_source(ItemList::scalars(ValueType::Integer, [1, 2]));

    assert_eq!(grid.column_count(), 1);
    assert!(!grid.try_set_cell_value(CellRef::new(0, 0), "abc"));
    assert!(grid.try_set_cell_value(CellRef::new(0, 0), "7"));
    assert_eq!(grid.cell_value(CellRef::new(0, 0)), Some(Value::Integer(7)));
}

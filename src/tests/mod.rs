use clap::Parser;

use crate::api::{ApiError, ApiOptions, Customer, CustomerApi};
use crate::app::{parse_command, Command};
use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::ConfigFile;
use crate::dialog::EditDialog;
use crate::output;
use crate::view::{self, DisplayMode, Row, ViewState};

fn customer(id: &str, first_name: &str) -> Customer {
    Customer {
        id: id.to_string(),
        first_name: Some(first_name.to_string()),
        email: Some(format!("{}@example.com", first_name.to_lowercase())),
        ..Customer::default()
    }
}

fn sample(count: usize) -> Vec<Customer> {
    (1..=count)
        .map(|i| customer(&i.to_string(), &format!("Cliente{i}")))
        .collect()
}

fn row_ids(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| match row {
            Row::Customer(customer) => Some(customer.id.clone()),
            Row::Notice(_) => None,
        })
        .collect()
}

#[test]
fn render_page_slices_in_tens() {
    let records = sample(25);
    let page1 = view::render_page(&records, 1);
    let page2 = view::render_page(&records, 2);
    let page3 = view::render_page(&records, 3);

    assert_eq!(
        row_ids(&page1.rows),
        (1..=10).map(|i| i.to_string()).collect::<Vec<_>>()
    );
    assert_eq!(
        row_ids(&page2.rows),
        (11..=20).map(|i| i.to_string()).collect::<Vec<_>>()
    );
    assert_eq!(
        row_ids(&page3.rows),
        (21..=25).map(|i| i.to_string()).collect::<Vec<_>>()
    );
    assert_eq!(page2.indicator, "Page 2");
}

#[test]
fn pager_flags_follow_bounds() {
    let records = sample(25);
    let page1 = view::render_page(&records, 1);
    assert!(!page1.prev_enabled);
    assert!(page1.next_enabled);

    let page2 = view::render_page(&records, 2);
    assert!(page2.prev_enabled);
    assert!(page2.next_enabled);

    let page3 = view::render_page(&records, 3);
    assert!(page3.prev_enabled);
    assert!(!page3.next_enabled);

    let short = sample(5);
    let only = view::render_page(&short, 1);
    assert!(!only.prev_enabled);
    assert!(!only.next_enabled);
}

#[test]
fn twenty_five_item_walk() {
    let mut state = ViewState::new();
    state.set_records(sample(25));

    assert!(state.next_page());
    assert_eq!(state.current_page(), 2);
    assert_eq!(
        row_ids(&state.current_view().rows),
        (11..=20).map(|i| i.to_string()).collect::<Vec<_>>()
    );

    assert!(state.next_page());
    assert_eq!(
        row_ids(&state.current_view().rows),
        (21..=25).map(|i| i.to_string()).collect::<Vec<_>>()
    );
    assert!(!state.current_view().next_enabled);
    assert!(!state.next_page());
    assert_eq!(state.current_page(), 3);
}

#[test]
fn empty_list_renders_single_notice_row() {
    let page = view::render_page(&[], 1);
    assert_eq!(page.rows.len(), 1);
    assert_eq!(
        page.rows[0],
        Row::Notice(view::EMPTY_LIST_NOTICE.to_string())
    );
    assert!(!page.prev_enabled);
    assert!(!page.next_enabled);
}

#[test]
fn falsy_fields_fall_back_individually() {
    let record = Customer {
        id: "9".to_string(),
        first_name: Some(String::new()),
        last_name: None,
        email: Some("ana@example.com".to_string()),
        phone: Some("0".to_string()),
        ..Customer::default()
    };
    let row = view::customer_row(&record);
    assert_eq!(row.id_text, "9");
    assert_eq!(row.first_name, view::FALLBACK_FIRST_NAME);
    assert_eq!(row.last_name, view::FALLBACK_LAST_NAME);
    assert_eq!(row.email, "ana@example.com");
    assert_eq!(row.phone, view::FALLBACK_PHONE);
    assert_eq!(row.address, view::FALLBACK_ADDRESS);
}

#[test]
fn failed_search_shows_error_row_and_indicator() {
    let mut state = ViewState::new();
    state.set_records(sample(12));

    let err = ApiError::Status { status: 404 };
    state.show_error(
        format!("Error: {}", err.with_context("Cliente no encontrado")),
        "Error: Cliente con ID 5 no encontrado.".to_string(),
    );

    let page = state.current_view();
    assert_eq!(page.rows.len(), 1);
    assert_eq!(
        page.rows[0],
        Row::Notice("Error: Cliente no encontrado: 404".to_string())
    );
    assert_eq!(page.indicator, "Error: Cliente con ID 5 no encontrado.");
    assert!(!page.prev_enabled);
    assert!(!page.next_enabled);
}

#[test]
fn clearing_search_restores_previous_page() {
    let mut state = ViewState::new();
    state.set_records(sample(25));
    assert!(state.next_page());
    let before = state.current_view();

    state.show_single("7", customer("7", "Cliente7"));
    state.clear_search();
    assert_eq!(state.current_view(), before);

    state.show_error("Error".to_string(), "Error".to_string());
    state.clear_search();
    assert_eq!(state.current_view(), before);
}

#[test]
fn render_page_is_idempotent() {
    let records = sample(13);
    assert_eq!(view::render_page(&records, 2), view::render_page(&records, 2));
}

#[test]
fn page_clamps_after_shrink() {
    let mut state = ViewState::new();
    state.set_records(sample(21));
    assert!(state.next_page());
    assert!(state.next_page());
    assert_eq!(state.current_page(), 3);

    // the only record on page 3 was deleted and the list re-fetched
    state.set_records(sample(20));
    assert_eq!(state.current_page(), 2);
    assert_eq!(state.current_view().indicator, "Page 2");

    state.set_records(Vec::new());
    assert_eq!(state.current_page(), 1);
    assert_eq!(
        state.current_view().rows[0],
        Row::Notice(view::EMPTY_LIST_NOTICE.to_string())
    );
}

#[test]
fn pager_is_inert_outside_paginated_mode() {
    let mut state = ViewState::new();
    state.set_records(sample(25));
    state.show_single("3", customer("3", "Cliente3"));
    assert!(!state.next_page());
    assert!(!state.prev_page());
    assert_eq!(state.current_page(), 1);
}

#[test]
fn single_result_view_disables_pagers() {
    let mut state = ViewState::new();
    state.set_records(sample(25));
    state.show_single("5", customer("5", "Cliente5"));

    let page = state.current_view();
    assert_eq!(page.indicator, "Mostrando resultado para ID: 5");
    assert_eq!(row_ids(&page.rows), vec!["5".to_string()]);
    assert!(!page.prev_enabled);
    assert!(!page.next_enabled);
}

#[test]
fn refetch_forces_paginated_mode() {
    let mut state = ViewState::new();
    state.set_records(sample(25));
    state.show_single("5", customer("5", "Cliente5"));

    // a successful delete or update always re-fetches the full list
    state.set_records(sample(24));
    assert_eq!(*state.mode(), DisplayMode::Paginated);
}

#[test]
fn total_pages_rounds_up() {
    assert_eq!(view::total_pages(0), 1);
    assert_eq!(view::total_pages(1), 1);
    assert_eq!(view::total_pages(10), 1);
    assert_eq!(view::total_pages(11), 2);
    assert_eq!(view::total_pages(25), 3);
}

#[test]
fn dialog_prefills_current_values() {
    let record = Customer {
        id: "4".to_string(),
        first_name: Some("Ana".to_string()),
        favorite_food: Some("Tacos".to_string()),
        ..Customer::default()
    };
    let dialog = EditDialog::from_customer(&record);
    assert_eq!(dialog.id, "4");
    assert_eq!(dialog.fields.len(), crate::dialog::FIELD_COUNT);
    assert_eq!(dialog.fields[0].value, "Ana");
    assert_eq!(dialog.fields[1].value, "");
    assert_eq!(dialog.fields[5].value, "Tacos");
}

#[test]
fn dialog_input_rules() {
    let mut dialog = EditDialog::from_customer(&customer("4", "Ana"));
    dialog.apply_input(0, "");
    assert_eq!(dialog.fields[0].value, "Ana");
    dialog.apply_input(0, "  Maria  ");
    assert_eq!(dialog.fields[0].value, "Maria");
    dialog.apply_input(0, "-");
    assert_eq!(dialog.fields[0].value, "");
}

#[test]
fn update_payload_always_carries_seven_fields() {
    let dialog = EditDialog::from_customer(&customer("4", "Ana"));
    let payload = dialog.update_payload();
    let value = serde_json::to_value(&payload).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 7);
    for key in [
        "nombre",
        "apellido",
        "email",
        "telefono",
        "direccion",
        "comida_favorita",
        "descuento_navideno",
    ] {
        assert!(object.contains_key(key), "missing wire field '{key}'");
    }
}

#[test]
fn customer_accepts_numeric_wire_values() {
    let record: Customer = serde_json::from_str(
        r#"{"id_cliente":5,"nombre":"Ana","descuento_navideno":10,"telefono":null}"#,
    )
    .unwrap();
    assert_eq!(record.id, "5");
    assert_eq!(record.first_name.as_deref(), Some("Ana"));
    assert_eq!(record.holiday_discount.as_deref(), Some("10"));
    assert_eq!(record.phone, None);
    assert_eq!(record.last_name, None);
}

#[tokio::test]
async fn endpoints_follow_base_url() {
    let api = CustomerApi::new(&ApiOptions {
        base_url: "https://api.example.com/api/cliente/".to_string(),
        ..ApiOptions::default()
    })
    .unwrap();
    assert_eq!(
        api.endpoint("obtclientes"),
        "https://api.example.com/api/cliente/obtclientes"
    );
    assert_eq!(
        api.endpoint("clientes/5"),
        "https://api.example.com/api/cliente/clientes/5"
    );
    assert_eq!(
        api.endpoint("elimclientes/5"),
        "https://api.example.com/api/cliente/elimclientes/5"
    );
    assert_eq!(
        api.endpoint("actclientes/5"),
        "https://api.example.com/api/cliente/actclientes/5"
    );
}

#[tokio::test]
async fn invalid_client_options_are_rejected() {
    let bad_scheme = CustomerApi::new(&ApiOptions {
        base_url: "ftp://api.example.com/".to_string(),
        ..ApiOptions::default()
    });
    assert!(matches!(bad_scheme, Err(ApiError::InvalidUrl(_))));

    let bad_header = CustomerApi::new(&ApiOptions {
        header: Some("not-a-header".to_string()),
        ..ApiOptions::default()
    });
    assert!(matches!(bad_header, Err(ApiError::InvalidHeader(_))));
}

#[test]
fn api_error_surfaces_status_code() {
    let err = ApiError::Status { status: 500 };
    assert_eq!(err.to_string(), "Error en la solicitud: 500");
    assert_eq!(err.status(), Some(500));
    assert_eq!(
        err.with_context("Error al eliminar cliente"),
        "Error al eliminar cliente: 500"
    );
}

#[test]
fn config_yaml_parses() {
    let cfg: ConfigFile =
        serde_yaml::from_str("api_url: http://localhost:3000/api\ntimeout: 15\nno_color: true\n")
            .unwrap();
    assert_eq!(cfg.api_url.as_deref(), Some("http://localhost:3000/api"));
    assert_eq!(cfg.timeout, Some(15));
    assert_eq!(cfg.no_color, Some(true));
    assert_eq!(cfg.header, None);
}

#[test]
fn export_format_detection() {
    assert_eq!(output::ExportFormat::parse("json"), Some(output::ExportFormat::Json));
    assert_eq!(output::ExportFormat::parse("TXT"), Some(output::ExportFormat::Text));
    assert_eq!(output::ExportFormat::parse("xml"), None);
    assert_eq!(
        output::infer_format_from_path("clientes.json"),
        Some(output::ExportFormat::Json)
    );
    assert_eq!(
        output::infer_format_from_path("clientes.txt"),
        Some(output::ExportFormat::Text)
    );
    assert_eq!(output::infer_format_from_path("clientes.dat"), None);
}

#[test]
fn export_renderers() {
    let records = sample(2);
    let text = String::from_utf8(output::render_text(&records)).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.contains("Cliente1"));

    let json: serde_json::Value =
        serde_json::from_slice(&output::render_json(&records)).unwrap();
    let array = json.as_array().unwrap();
    assert_eq!(array.len(), 2);
    assert_eq!(array[0]["id_cliente"], "1");
}

#[test]
fn table_renders_headers_and_notices() {
    let records = sample(1);
    let page = view::render_page(&records, 1);
    let table = output::render_table(&page);
    assert!(table.contains("| ID"));
    assert!(table.contains("Cliente1"));

    let empty = view::render_page(&[], 1);
    let table = output::render_table(&empty);
    assert!(table.contains(view::EMPTY_LIST_NOTICE));
}

#[test]
fn command_parsing() {
    assert_eq!(parse_command(""), Ok(Command::Show));
    assert_eq!(parse_command("n"), Ok(Command::Next));
    assert_eq!(parse_command("next"), Ok(Command::Next));
    assert_eq!(parse_command("p"), Ok(Command::Prev));
    assert_eq!(parse_command("search"), Ok(Command::Search(None)));
    assert_eq!(
        parse_command("s 5"),
        Ok(Command::Search(Some("5".to_string())))
    );
    assert_eq!(
        parse_command("buscar 12"),
        Ok(Command::Search(Some("12".to_string())))
    );
    assert_eq!(parse_command("d 3"), Ok(Command::Delete("3".to_string())));
    assert_eq!(parse_command("edit 2"), Ok(Command::Edit("2".to_string())));
    assert_eq!(parse_command("refresh"), Ok(Command::Refresh));
    assert_eq!(
        parse_command("x out.json"),
        Ok(Command::Export("out.json".to_string()))
    );
    assert_eq!(parse_command("help"), Ok(Command::Help));
    assert_eq!(parse_command("q"), Ok(Command::Quit));

    assert!(parse_command("delete").is_err());
    assert!(parse_command("edit").is_err());
    assert!(parse_command("bogus").unwrap_err().contains("unknown command"));
}

#[test]
fn validation_rejects_bad_input() {
    let args = CliArgs::parse_from(["clientele", "-u", "ftp://host/api"]);
    assert!(validation::validate(&args).is_err());

    let args = CliArgs::parse_from(["clientele", "--timeout", "0"]);
    assert!(validation::validate(&args).is_err());

    let args = CliArgs::parse_from(["clientele", "--hdr", "no-colon-here"]);
    assert!(validation::validate(&args).is_err());

    let args = CliArgs::parse_from(["clientele", "-u", "https://host/api", "--hdr", "X-Key: v"]);
    assert!(validation::validate(&args).is_ok());
}

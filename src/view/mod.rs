use crate::api::Customer;
use crate::dialog::EditDialog;

pub const PAGE_SIZE: usize = 10;

pub const EMPTY_LIST_NOTICE: &str = "No hay clientes para mostrar.";

pub const FALLBACK_ID: &str = "ID no disponible";
pub const FALLBACK_FIRST_NAME: &str = "Nombre no disponible";
pub const FALLBACK_LAST_NAME: &str = "Apellido no disponible";
pub const FALLBACK_EMAIL: &str = "Email no disponible";
pub const FALLBACK_PHONE: &str = "Teléfono no disponible";
pub const FALLBACK_ADDRESS: &str = "Dirección no disponible";
pub const FALLBACK_FAVORITE_FOOD: &str = "Comida no disponible";
pub const FALLBACK_HOLIDAY_DISCOUNT: &str = "Descuento no disponible";

/// One rendered table row. A customer row keeps the raw record id so the
/// session's `delete <id>` / `edit <id>` commands stay keyed to it; notice
/// rows carry no actions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Row {
    Notice(String),
    Customer(CustomerRow),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerRow {
    pub id: String,
    pub id_text: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub favorite_food: String,
    pub holiday_discount: String,
}

impl CustomerRow {
    pub fn columns(&self) -> [&str; 8] {
        [
            &self.id_text,
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.address,
            &self.favorite_food,
            &self.holiday_discount,
        ]
    }
}

/// Everything the terminal needs to draw one screen: rows, the indicator
/// line, and whether each pager control is usable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageView {
    pub rows: Vec<Row>,
    pub indicator: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

// Missing, empty, and "0" all read as absent. Presence check, not a type
// check: the original data source surfaces zeroes for unset columns.
fn present_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() && v != "0" => v.to_string(),
        _ => fallback.to_string(),
    }
}

pub fn customer_row(customer: &Customer) -> CustomerRow {
    CustomerRow {
        id: customer.id.clone(),
        id_text: present_or(Some(customer.id.as_str()), FALLBACK_ID),
        first_name: present_or(customer.first_name.as_deref(), FALLBACK_FIRST_NAME),
        last_name: present_or(customer.last_name.as_deref(), FALLBACK_LAST_NAME),
        email: present_or(customer.email.as_deref(), FALLBACK_EMAIL),
        phone: present_or(customer.phone.as_deref(), FALLBACK_PHONE),
        address: present_or(customer.address.as_deref(), FALLBACK_ADDRESS),
        favorite_food: present_or(customer.favorite_food.as_deref(), FALLBACK_FAVORITE_FOOD),
        holiday_discount: present_or(
            customer.holiday_discount.as_deref(),
            FALLBACK_HOLIDAY_DISCOUNT,
        ),
    }
}

pub fn build_rows(page_items: &[Customer]) -> Vec<Row> {
    if page_items.is_empty() {
        return vec![Row::Notice(EMPTY_LIST_NOTICE.to_string())];
    }
    page_items
        .iter()
        .map(|customer| Row::Customer(customer_row(customer)))
        .collect()
}

/// Pure view of one page: no I/O, same inputs always yield the same view.
pub fn render_page(records: &[Customer], page: usize) -> PageView {
    let start = page.saturating_sub(1) * PAGE_SIZE;
    let end = start + PAGE_SIZE;
    let slice = match records.get(start..end.min(records.len())) {
        Some(slice) => slice,
        None => &[],
    };
    PageView {
        rows: build_rows(slice),
        indicator: format!("Page {page}"),
        prev_enabled: page > 1,
        next_enabled: end < records.len(),
    }
}

pub fn single_result_view(customer: &Customer, searched_id: &str) -> PageView {
    PageView {
        rows: vec![Row::Customer(customer_row(customer))],
        indicator: format!("Mostrando resultado para ID: {searched_id}"),
        prev_enabled: false,
        next_enabled: false,
    }
}

pub fn error_view(message: &str, indicator: &str) -> PageView {
    PageView {
        rows: vec![Row::Notice(message.to_string())],
        indicator: indicator.to_string(),
        prev_enabled: false,
        next_enabled: false,
    }
}

pub fn total_pages(record_count: usize) -> usize {
    if record_count == 0 {
        1
    } else {
        (record_count + PAGE_SIZE - 1) / PAGE_SIZE
    }
}

/// The three mutually exclusive ways the table can be filled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    Paginated,
    SingleResult {
        searched_id: String,
        customer: Customer,
    },
    Error {
        message: String,
        indicator: String,
    },
}

/// View state owned by the session controller: the fetched records, the
/// active page, the display mode, and the active edit dialog slot.
#[derive(Debug)]
pub struct ViewState {
    records: Vec<Customer>,
    current_page: usize,
    mode: DisplayMode,
    dialog: Option<EditDialog>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        ViewState {
            records: Vec::new(),
            current_page: 1,
            mode: DisplayMode::Paginated,
            dialog: None,
        }
    }

    pub fn records(&self) -> &[Customer] {
        &self.records
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn mode(&self) -> &DisplayMode {
        &self.mode
    }

    /// Wholesale replacement after every fetch. Clamps the page back into
    /// range so a shrunken list never leaves an empty final page showing,
    /// and drops out of any search or error display.
    pub fn set_records(&mut self, records: Vec<Customer>) {
        self.records = records;
        let last = total_pages(self.records.len());
        if self.current_page > last {
            self.current_page = last;
        }
        if self.current_page == 0 {
            self.current_page = 1;
        }
        self.mode = DisplayMode::Paginated;
    }

    /// Advances one page. No-op outside paginated mode or on the last page;
    /// the rendered pager flag is the primary guard, this re-checks.
    pub fn next_page(&mut self) -> bool {
        if self.mode != DisplayMode::Paginated {
            return false;
        }
        if self.current_page * PAGE_SIZE >= self.records.len() {
            return false;
        }
        self.current_page += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if self.mode != DisplayMode::Paginated {
            return false;
        }
        if self.current_page <= 1 {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Display-only override: the record list and page stay untouched.
    pub fn show_single(&mut self, searched_id: &str, customer: Customer) {
        self.mode = DisplayMode::SingleResult {
            searched_id: searched_id.to_string(),
            customer,
        };
    }

    pub fn show_error(&mut self, message: String, indicator: String) {
        self.mode = DisplayMode::Error { message, indicator };
    }

    /// Restores the paginated view at the page that was active before the
    /// search or error took over.
    pub fn clear_search(&mut self) {
        self.mode = DisplayMode::Paginated;
    }

    pub fn current_view(&self) -> PageView {
        match &self.mode {
            DisplayMode::Paginated => render_page(&self.records, self.current_page),
            DisplayMode::SingleResult {
                searched_id,
                customer,
            } => single_result_view(customer, searched_id),
            DisplayMode::Error { message, indicator } => error_view(message, indicator),
        }
    }

    /// Opening while a dialog is already active replaces it: last edit
    /// action wins.
    pub fn open_dialog(&mut self, dialog: EditDialog) {
        self.dialog = Some(dialog);
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn dialog(&self) -> Option<&EditDialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut EditDialog> {
        self.dialog.as_mut()
    }
}

use crate::api::{Customer, CustomerUpdate};

pub const FIELD_COUNT: usize = 7;

const LABELS: [&str; FIELD_COUNT] = [
    "Nombre",
    "Apellido",
    "Email",
    "Teléfono",
    "Dirección",
    "Comida Favorita",
    "Descuento Navideño",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogField {
    pub label: &'static str,
    pub value: String,
}

/// The edit form as data: one entry per editable field, prefilled with the
/// record's current values (missing fields prefill empty, as the original
/// form did).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditDialog {
    pub id: String,
    pub fields: Vec<DialogField>,
}

impl EditDialog {
    pub fn from_customer(customer: &Customer) -> Self {
        let values = [
            customer.first_name.clone().unwrap_or_default(),
            customer.last_name.clone().unwrap_or_default(),
            customer.email.clone().unwrap_or_default(),
            customer.phone.clone().unwrap_or_default(),
            customer.address.clone().unwrap_or_default(),
            customer.favorite_food.clone().unwrap_or_default(),
            customer.holiday_discount.clone().unwrap_or_default(),
        ];
        let fields = LABELS
            .into_iter()
            .zip(values)
            .map(|(label, value)| DialogField { label, value })
            .collect();
        EditDialog {
            id: customer.id.clone(),
            fields,
        }
    }

    /// An empty line keeps the current value, a lone `-` clears the field,
    /// anything else replaces it.
    pub fn apply_input(&mut self, index: usize, input: &str) {
        let field = match self.fields.get_mut(index) {
            Some(field) => field,
            None => return,
        };
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return;
        }
        if trimmed == "-" {
            field.value.clear();
            return;
        }
        field.value = trimmed.to_string();
    }

    /// All seven fields go out on every save, changed or not.
    pub fn update_payload(&self) -> CustomerUpdate {
        CustomerUpdate {
            first_name: self.value(0),
            last_name: self.value(1),
            email: self.value(2),
            phone: self.value(3),
            address: self.value(4),
            favorite_food: self.value(5),
            holiday_discount: self.value(6),
        }
    }

    fn value(&self, index: usize) -> String {
        self.fields
            .get(index)
            .map(|field| field.value.clone())
            .unwrap_or_default()
    }
}

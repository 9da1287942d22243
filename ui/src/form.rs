//! Form contents and the validation gate in front of create/update.
//!
//! Every input holds text, exactly as the user typed it. `validate` is the
//! only way to turn a `FormState` into a `Car` payload.

use autos_core::{Car, CarRecord};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Make,
    Model,
    Year,
    Price,
    Mileage,
    Color,
    Transmission,
    Fuel,
    ImageUrl,
    Description,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        FormField::Make,
        FormField::Model,
        FormField::Year,
        FormField::Price,
        FormField::Mileage,
        FormField::Color,
        FormField::Transmission,
        FormField::Fuel,
        FormField::ImageUrl,
        FormField::Description,
    ];

    /// Element id of the input bound to this field.
    pub fn input_id(self) -> &'static str {
        match self {
            FormField::Make => "id_marca",
            FormField::Model => "id_modelo",
            FormField::Year => "id_anio",
            FormField::Price => "id_precio",
            FormField::Mileage => "id_kilometraje",
            FormField::Color => "id_color",
            FormField::Transmission => "id_transmision",
            FormField::Fuel => "id_combustible",
            FormField::ImageUrl => "id_imagenUrl",
            FormField::Description => "id_descripcion",
        }
    }

    /// Image and description may be left blank.
    pub fn is_required(self) -> bool {
        !matches!(self, FormField::ImageUrl | FormField::Description)
    }

    fn is_numeric(self) -> bool {
        matches!(self, FormField::Year | FormField::Price)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    Missing,
    NotANumber,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("form rejected: {}", describe(.problems))]
pub struct ValidationError {
    pub problems: Vec<(FormField, Problem)>,
}

impl ValidationError {
    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.problems.iter().map(|(field, _)| *field)
    }
}

fn describe(problems: &[(FormField, Problem)]) -> String {
    problems
        .iter()
        .map(|(field, problem)| match problem {
            Problem::Missing => format!("{} is required", field.input_id()),
            Problem::NotANumber => format!("{} must be a number", field.input_id()),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub make: String,
    pub model: String,
    pub year: String,
    pub price: String,
    pub mileage: String,
    pub color: String,
    pub transmission: String,
    pub fuel: String,
    pub image_url: String,
    pub description: String,
}

impl FormState {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Make => &self.make,
            FormField::Model => &self.model,
            FormField::Year => &self.year,
            FormField::Price => &self.price,
            FormField::Mileage => &self.mileage,
            FormField::Color => &self.color,
            FormField::Transmission => &self.transmission,
            FormField::Fuel => &self.fuel,
            FormField::ImageUrl => &self.image_url,
            FormField::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Make => &mut self.make,
            FormField::Model => &mut self.model,
            FormField::Year => &mut self.year,
            FormField::Price => &mut self.price,
            FormField::Mileage => &mut self.mileage,
            FormField::Color => &mut self.color,
            FormField::Transmission => &mut self.transmission,
            FormField::Fuel => &mut self.fuel,
            FormField::ImageUrl => &mut self.image_url,
            FormField::Description => &mut self.description,
        };
        *slot = value.into();
    }

    /// Form contents that show `record` for editing.
    ///
    /// Year and price are shown as the numbers the record decoded to, not as
    /// the server's raw text: `"8500.50"` reads back as `8500.5` and a blank
    /// year as `0`. Either value still validates and posts the same amount.
    pub fn from_record(record: &CarRecord) -> Self {
        let car = &record.car;
        Self {
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year.to_string(),
            price: car.price.to_string(),
            mileage: car.mileage.clone(),
            color: car.color.clone(),
            transmission: car.transmission.clone(),
            fuel: car.fuel.clone(),
            image_url: car.image_url.clone(),
            description: car.description.clone(),
        }
    }

    /// Check required fields and numeric inputs, reporting every problem at
    /// once. Values are trimmed before they go into the payload.
    pub fn validate(&self) -> Result<Car, ValidationError> {
        let mut problems = Vec::new();
        for field in FormField::ALL {
            let value = self.get(field).trim();
            if value.is_empty() {
                if field.is_required() {
                    problems.push((field, Problem::Missing));
                }
            } else if field.is_numeric() && !parses_as_number(field, value) {
                problems.push((field, Problem::NotANumber));
            }
        }
        if !problems.is_empty() {
            return Err(ValidationError { problems });
        }

        let text = |field| self.get(field).trim().to_string();
        // Both parses were checked above.
        let year = self.year.trim().parse().unwrap_or_default();
        let price = self.price.trim().parse().unwrap_or_default();
        Ok(Car {
            make: text(FormField::Make),
            model: text(FormField::Model),
            year,
            price,
            mileage: text(FormField::Mileage),
            color: text(FormField::Color),
            transmission: text(FormField::Transmission),
            fuel: text(FormField::Fuel),
            image_url: text(FormField::ImageUrl),
            description: text(FormField::Description),
        })
    }
}

fn parses_as_number(field: FormField, value: &str) -> bool {
    match field {
        FormField::Year => value.parse::<i32>().is_ok(),
        _ => value
            .parse::<f64>()
            .map(|n| n.is_finite() && n >= 0.0)
            .unwrap_or(false),
    }
}

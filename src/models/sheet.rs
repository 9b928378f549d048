use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Blank margins on each edge of a sheet, in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Margins {
    pub fn uniform(margin: f64) -> Self {
        Self {
            top: margin,
            bottom: margin,
            left: margin,
            right: margin,
        }
    }
}

/// Caller-supplied fields for creating or replacing a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetSpec {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub material: String,
}

/// A print sheet that die lines are ganged onto.
#[derive(Debug, Clone, Serialize)]
pub struct Sheet {
    pub id: Uuid,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub material: String,
    pub created_at: DateTime<Utc>,
}

impl Sheet {
    pub(crate) fn new(spec: SheetSpec) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: spec.name,
            width: spec.width,
            height: spec.height,
            margins: spec.margins,
            material: spec.material,
            created_at: Utc::now(),
        }
    }

    /// Overwrite every editable field; `id` and `created_at` are kept.
    pub(crate) fn apply(&mut self, spec: SheetSpec) {
        self.name = spec.name;
        self.width = spec.width;
        self.height = spec.height;
        self.margins = spec.margins;
        self.material = spec.material;
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Right edge of the printable region.
    pub fn usable_right(&self) -> f64 {
        self.width - self.margins.right
    }

    /// Bottom edge of the printable region.
    pub fn usable_bottom(&self) -> f64 {
        self.height - self.margins.bottom
    }
}

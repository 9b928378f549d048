use serde::Serialize;
use uuid::Uuid;

/// Outline of a cut shape, reduced to its bounding box in millimetres.
#[derive(Debug, Clone, Serialize)]
pub struct DieLine {
    pub id: Uuid,
    pub name: String,
    pub width: f64,
    pub height: f64,
}

impl DieLine {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// How many copies of a die line to gang onto a sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DieLineQuantity {
    pub die_line_id: Uuid,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NestingOptions {
    /// Gap kept to the right of and below every placement (mm).
    pub spacing: f64,
}

impl Default for NestingOptions {
    fn default() -> Self {
        Self { spacing: 5.0 }
    }
}

/// Bounds for searching a sheet size, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetSizeRange {
    pub min_width: f64,
    pub max_width: f64,
    pub min_height: f64,
    pub max_height: f64,
}

/// One die line copy positioned on a sheet, top-left origin.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedDieLine {
    pub id: Uuid,
    pub die_line_id: Uuid,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub quantity: u32,
}

/// Outcome of laying die lines out on a sheet.
#[derive(Debug, Clone, Serialize)]
pub struct NestingResult {
    pub sheet_id: Uuid,
    pub placements: Vec<PlacedDieLine>,
    /// Copies that did not fit on the sheet.
    pub unplaced: usize,
    pub utilization: f64,
    pub waste_percentage: f64,
    pub total_area: f64,
    pub used_area: f64,
}

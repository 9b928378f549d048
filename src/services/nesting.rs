use uuid::Uuid;

use crate::models::nesting::{
    DieLine, DieLineQuantity, NestingOptions, NestingResult, PlacedDieLine, SheetSizeRange,
};
use crate::models::sheet::{Margins, Sheet, SheetSpec};
use crate::services::die_lines::DieLineRegistry;

/// Lay the requested die lines out on `sheet`, largest first, in rows.
///
/// Shelf packing (first-fit decreasing by area):
/// - each copy occupies its bounding box plus `spacing` to the right and below
/// - copies fill the current row left to right inside the margins
/// - a copy that overruns the right margin starts a new row under the tallest
///   copy of the current one
/// - a copy that overruns the bottom margin is counted as unplaced; smaller
///   copies after it may still fit
///
/// Copies are never rotated.
pub fn optimize_layout(
    sheet: &Sheet,
    die_lines: &DieLineRegistry,
    requested: &[DieLineQuantity],
    options: &NestingOptions,
) -> Result<NestingResult, NestingError> {
    let total_area = usable_area(sheet)?;

    let mut copies: Vec<&DieLine> = Vec::new();
    for request in requested {
        let die_line = lookup(die_lines, request.die_line_id)?;
        copies.extend(std::iter::repeat(die_line).take(request.quantity as usize));
    }
    copies.sort_by(|a, b| b.area().total_cmp(&a.area()));

    let right = sheet.usable_right();
    let bottom = sheet.usable_bottom();
    let mut x = sheet.margins.left;
    let mut y = sheet.margins.top;
    let mut row_height = 0.0_f64;

    let mut placements = Vec::new();
    let mut used_area = 0.0;
    let mut unplaced = 0;

    for die_line in copies {
        let width = die_line.width + options.spacing;
        let height = die_line.height + options.spacing;

        if x + width > right && row_height > 0.0 {
            x = sheet.margins.left;
            y += row_height;
            row_height = 0.0;
        }

        if x + width <= right && y + height <= bottom {
            placements.push(PlacedDieLine {
                id: Uuid::new_v4(),
                die_line_id: die_line.id,
                x,
                y,
                rotation: 0.0,
                quantity: 1,
            });
            used_area += die_line.area();
            x += width;
            row_height = row_height.max(height);
        } else {
            unplaced += 1;
        }
    }

    let utilization = used_area / total_area * 100.0;
    tracing::info!(
        sheet_id = %sheet.id,
        placed = placements.len(),
        unplaced,
        utilization,
        "Nested die lines"
    );

    Ok(NestingResult {
        sheet_id: sheet.id,
        placements,
        unplaced,
        utilization,
        waste_percentage: 100.0 - utilization,
        total_area,
        used_area,
    })
}

/// Margin on every edge of a generated sheet (mm).
const GENERATED_MARGIN: f64 = 10.0;

/// Candidate sizes per dimension are this many equal steps from min to max.
const SIZE_STEPS: u32 = 5;

/// Pick the sheet size within `range` that holds every requested copy at the
/// highest utilization.
///
/// Candidates form a grid over both dimensions, tried smallest area first, so
/// ties go to the smaller sheet. Each minimum is raised until the largest die
/// line fits inside the generated margins.
pub fn optimize_sheet_size(
    die_lines: &DieLineRegistry,
    requested: &[DieLineQuantity],
    range: &SheetSizeRange,
    options: &NestingOptions,
) -> Result<(Sheet, NestingResult), NestingError> {
    let mut widest = 0.0_f64;
    let mut tallest = 0.0_f64;
    let mut copies = 0_usize;
    for request in requested.iter().filter(|r| r.quantity > 0) {
        let die_line = lookup(die_lines, request.die_line_id)?;
        widest = widest.max(die_line.width);
        tallest = tallest.max(die_line.height);
        copies += request.quantity as usize;
    }
    if copies == 0 {
        return Err(NestingError::NoDieLines);
    }

    let min_width = range.min_width.max(widest + 2.0 * GENERATED_MARGIN);
    let min_height = range.min_height.max(tallest + 2.0 * GENERATED_MARGIN);
    let widths = size_steps(min_width, range.max_width);
    let heights = size_steps(min_height, range.max_height);
    let mut candidates: Vec<(f64, f64)> = widths
        .iter()
        .flat_map(|&w| heights.iter().map(move |&h| (w, h)))
        .collect();
    candidates.sort_by(|a, b| (a.0 * a.1).total_cmp(&(b.0 * b.1)));

    let mut best: Option<(Sheet, NestingResult)> = None;
    for (width, height) in candidates {
        let sheet = Sheet::new(SheetSpec {
            name: "Optimized Sheet".to_string(),
            width,
            height,
            margins: Margins::uniform(GENERATED_MARGIN),
            material: "Auto".to_string(),
        });
        let result = optimize_layout(&sheet, die_lines, requested, options)?;
        let improves = best
            .as_ref()
            .map_or(true, |(_, current)| result.utilization > current.utilization);
        if result.unplaced == 0 && improves {
            best = Some((sheet, result));
        }
    }

    let (sheet, result) = best.ok_or(NestingError::NoSheetFits(*range))?;
    tracing::info!(
        width = sheet.width,
        height = sheet.height,
        utilization = result.utilization,
        "Chose sheet size"
    );
    Ok((sheet, result))
}

fn size_steps(min: f64, max: f64) -> Vec<f64> {
    if min > max {
        return Vec::new();
    }
    let step = (max - min) / f64::from(SIZE_STEPS);
    let mut sizes: Vec<f64> = (0..=SIZE_STEPS)
        .map(|i| if i == SIZE_STEPS { max } else { min + step * f64::from(i) })
        .collect();
    sizes.dedup();
    sizes
}

/// Percentage of the sheet not covered by `placements`.
pub fn calculate_waste(
    sheet: &Sheet,
    die_lines: &DieLineRegistry,
    placements: &[PlacedDieLine],
) -> Result<f64, NestingError> {
    let total_area = usable_area(sheet)?;

    let mut used_area = 0.0;
    for placement in placements {
        let die_line = lookup(die_lines, placement.die_line_id)?;
        used_area += die_line.area() * f64::from(placement.quantity);
    }

    Ok((total_area - used_area) / total_area * 100.0)
}

fn lookup(die_lines: &DieLineRegistry, id: Uuid) -> Result<&DieLine, NestingError> {
    die_lines.get(id).ok_or(NestingError::UnknownDieLine(id))
}

fn usable_area(sheet: &Sheet) -> Result<f64, NestingError> {
    let area = sheet.area();
    if area > 0.0 {
        Ok(area)
    } else {
        Err(NestingError::EmptySheet(sheet.id))
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum NestingError {
    #[error("Die line {0} not found")]
    UnknownDieLine(Uuid),

    #[error("Sheet {0} has no area to nest onto")]
    EmptySheet(Uuid),

    #[error("No die lines to optimize")]
    NoDieLines,

    #[error(
        "Could not fit all die lines within sheet size range: {}x{} to {}x{}",
        .0.min_width, .0.min_height, .0.max_width, .0.max_height
    )]
    NoSheetFits(SheetSizeRange),
}

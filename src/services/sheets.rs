use uuid::Uuid;

use crate::models::sheet::{Sheet, SheetSpec};

/// In-memory sheet store, kept in creation order.
#[derive(Debug, Default)]
pub struct SheetRegistry {
    sheets: Vec<Sheet>,
}

impl SheetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, spec: SheetSpec) -> &Sheet {
        let sheet = Sheet::new(spec);
        tracing::info!(sheet_id = %sheet.id, name = %sheet.name, "Created sheet");
        self.sheets.push(sheet);
        &self.sheets[self.sheets.len() - 1]
    }

    pub fn get(&self, id: Uuid) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.id == id)
    }

    pub fn list(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Replace a sheet's editable fields. `None` if the sheet does not exist.
    pub fn update(&mut self, id: Uuid, spec: SheetSpec) -> Option<&Sheet> {
        let sheet = self.sheets.iter_mut().find(|s| s.id == id)?;
        sheet.apply(spec);
        tracing::info!(sheet_id = %id, "Updated sheet");
        Some(&*sheet)
    }

    pub fn delete(&mut self, id: Uuid) -> bool {
        let Some(pos) = self.sheets.iter().position(|s| s.id == id) else {
            return false;
        };
        self.sheets.remove(pos);
        tracing::info!(sheet_id = %id, "Deleted sheet");
        true
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sheet::Margins;

    fn spec(name: &str) -> SheetSpec {
        SheetSpec {
            name: name.to_string(),
            width: 500.0,
            height: 700.0,
            margins: Margins::uniform(10.0),
            material: "SBS board".to_string(),
        }
    }

    #[test]
    fn test_create_and_get() {
        let mut registry = SheetRegistry::new();
        let id = registry.create(spec("B2")).id;

        let sheet = registry.get(id).unwrap();
        assert_eq!(sheet.name, "B2");
        assert_eq!(sheet.margins.left, 10.0);
        assert_eq!(sheet.area(), 350_000.0);
        assert_eq!(sheet.usable_right(), 490.0);
        assert_eq!(sheet.usable_bottom(), 690.0);
        assert!(registry.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_update_keeps_identity() {
        let mut registry = SheetRegistry::new();
        let (id, created_at) = {
            let sheet = registry.create(spec("B2"));
            (sheet.id, sheet.created_at)
        };

        let mut replacement = spec("B1");
        replacement.width = 707.0;
        replacement.material = "Kraft".to_string();
        let sheet = registry.update(id, replacement).unwrap();

        assert_eq!(sheet.id, id);
        assert_eq!(sheet.created_at, created_at);
        assert_eq!(sheet.name, "B1");
        assert_eq!(sheet.width, 707.0);
        assert_eq!(sheet.material, "Kraft");
        assert!(registry.update(Uuid::new_v4(), spec("X")).is_none());
    }

    #[test]
    fn test_list_and_delete() {
        let mut registry = SheetRegistry::new();
        let first = registry.create(spec("first")).id;
        registry.create(spec("second"));

        assert!(registry.delete(first));
        assert!(!registry.delete(first));
        let names: Vec<&str> = registry.list().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["second"]);
        assert_eq!(registry.len(), 1);
    }
}

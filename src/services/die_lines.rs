use uuid::Uuid;

use crate::models::nesting::DieLine;

/// In-memory die line store, kept in registration order.
#[derive(Debug, Default)]
pub struct DieLineRegistry {
    die_lines: Vec<DieLine>,
}

impl DieLineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a die line by its bounding box.
    pub fn create(&mut self, name: impl Into<String>, width: f64, height: f64) -> &DieLine {
        let die_line = DieLine {
            id: Uuid::new_v4(),
            name: name.into(),
            width,
            height,
        };
        tracing::debug!(die_line_id = %die_line.id, name = %die_line.name, "Registered die line");
        self.die_lines.push(die_line);
        &self.die_lines[self.die_lines.len() - 1]
    }

    pub fn get(&self, id: Uuid) -> Option<&DieLine> {
        self.die_lines.iter().find(|d| d.id == id)
    }

    pub fn list(&self) -> &[DieLine] {
        &self.die_lines
    }

    pub fn delete(&mut self, id: Uuid) -> bool {
        let Some(pos) = self.die_lines.iter().position(|d| d.id == id) else {
            return false;
        };
        self.die_lines.remove(pos);
        true
    }
}

use glowcart_core::recommend::ProductMappingTable;

use super::{to_data, CommandResult};

const COMMAND: &str = "table";

pub fn run(gaps: bool) -> CommandResult {
    let table = ProductMappingTable::builtin();

    if gaps {
        let missing = table.coverage_gaps();
        let keys = missing.iter().map(ToString::to_string).collect::<Vec<_>>();
        let data = match to_data(COMMAND, &keys) {
            Ok(data) => data,
            Err(failure) => return failure,
        };
        let mut lines = vec![format!("{} composable keys resolve to nothing:", keys.len())];
        lines.extend(keys.iter().map(|key| format!("- {key}")));
        return CommandResult::success_with_data(COMMAND, lines.join("\n"), data);
    }

    let mut lines = vec![format!("{} mapping entries:", table.len())];
    lines.extend(table.entries().map(|(key, template)| format!("- {key} -> {}", template.product)));
    CommandResult::success(COMMAND, lines.join("\n"))
}

//! Plain-text rendering of the status view.

use crate::ui::viewmodel::StatusViewModel;
use std::fmt::Write as _;

const fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// Renders the status view as lines of text.
///
/// ```text
/// root: /code/app
/// hide mode: on
/// focus mode: off
/// [H] build
/// [F] src/core
/// managed exclusions: 1
/// ```
#[must_use]
pub fn render_status(vm: &StatusViewModel) -> String {
    let mut out = String::new();

    for root in &vm.roots {
        let _ = writeln!(out, "root: {root}");
    }
    let _ = writeln!(out, "hide mode: {}", on_off(vm.hide_mode));
    let _ = writeln!(out, "focus mode: {}", on_off(vm.focus_mode));

    if vm.items.is_empty() {
        out.push_str("no marked items\n");
    }
    for item in &vm.items {
        let _ = writeln!(out, "[{}] {}", item.mark.badge(), item.relative);
    }

    let _ = writeln!(out, "managed exclusions: {}", vm.managed_exclusions);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Mark;
    use crate::ui::viewmodel::MarkedItem;

    #[test]
    fn renders_modes_and_items() {
        let vm = StatusViewModel {
            roots: vec!["/code/app".to_string()],
            hide_mode: true,
            focus_mode: false,
            items: vec![
                MarkedItem { relative: "build".to_string(), mark: Mark::Hidden },
                MarkedItem { relative: "src/core".to_string(), mark: Mark::Focused },
            ],
            managed_exclusions: 1,
        };

        assert_eq!(
            render_status(&vm),
            "root: /code/app\nhide mode: on\nfocus mode: off\n[H] build\n[F] src/core\nmanaged exclusions: 1\n"
        );
    }

    #[test]
    fn renders_empty_state() {
        let vm = StatusViewModel {
            roots: vec![],
            hide_mode: false,
            focus_mode: false,
            items: vec![],
            managed_exclusions: 0,
        };
        assert!(render_status(&vm).contains("no marked items\n"));
    }
}

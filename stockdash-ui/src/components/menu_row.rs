//! Menu Row Pieces
//!
//! Shared by the sidebar and the admin list: both render rows produced by the
//! same tree walk and only differ in their indentation base.

use leptos::*;

/// Inline style for a row indented by `indent` logical pixels
pub fn indent_style(indent: u32) -> String {
    format!("padding-left: {}px", indent)
}

/// Icon followed by the label; the label is dropped when `compact`
#[component]
pub fn MenuLabel(
    #[prop(into)]
    icon: String,
    #[prop(into)]
    label: String,
    #[prop(optional)]
    compact: bool,
) -> impl IntoView {
    view! {
        <span class="flex items-center space-x-3 min-w-0">
            <span class="text-lg shrink-0">{icon}</span>
            {(!compact).then(|| view! { <span class="truncate">{label}</span> })}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_style() {
        assert_eq!(indent_style(16), "padding-left: 16px");
        assert_eq!(indent_style(56), "padding-left: 56px");
    }
}

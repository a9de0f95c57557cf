use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sheetcraft::resolve::{acknowledgment, fallback_acknowledgment, keywords};
use sheetcraft::{
    resolve, Assistant, MemorySurface, Sender, SheetRange, Status, TemplateId, Workbook,
};

fn all_keywords() -> Vec<&'static str> {
    TemplateId::ALL
        .into_iter()
        .flat_map(|id| keywords(id).iter().copied())
        .collect()
}

proptest! {
    #[test]
    fn resolving_is_deterministic(command in ".{0,60}") {
        prop_assert_eq!(resolve(&command), resolve(&command));
    }

    #[test]
    fn case_does_not_matter(command in "[a-zA-Z ]{0,40}") {
        prop_assert_eq!(
            resolve(&command).template,
            resolve(&command.to_uppercase()).template
        );
    }

    #[test]
    fn unmatched_commands_get_the_fallback(command in "[xyz0-9 ]{1,30}") {
        let resolution = resolve(&command);
        prop_assert_eq!(resolution.template, None);
        prop_assert_eq!(resolution.acknowledgment, fallback_acknowledgment(&command));
    }

    #[test]
    fn keyword_anywhere_matches(prefix in "[xyz ]{0,10}", suffix in "[xyz ]{0,10}", index in 0usize..8) {
        let keyword = all_keywords()[index];
        let resolution = resolve(&format!("{prefix}{keyword}{suffix}"));
        let template = resolution.template.unwrap();
        prop_assert!(keywords(template).contains(&keyword));
        prop_assert_eq!(resolution.acknowledgment, acknowledgment(template));
    }
}

#[test]
fn chat_session_end_to_end() {
    let mut workbook = Workbook::new();
    let ws = workbook.worksheet_mut(0).unwrap();
    for row in 0..5 {
        ws.set_cell_value_at(row, 0, row as f64 + 1.0).unwrap();
        ws.set_cell_value_at(row, 1, (row as f64 + 1.0) * 2.0).unwrap();
    }
    let mut surface = MemorySurface::with_workbook(workbook);
    surface.select(SheetRange::parse("A1:B5").unwrap()).unwrap();
    let mut assistant = Assistant::new(surface);

    assistant.send_message("Make a budget").unwrap();
    assistant.send_message("please analyze").unwrap();
    assistant.send_message("hello there").unwrap();
    assistant.quick_action(TemplateId::Budget).unwrap();

    let senders: Vec<Sender> = assistant.transcript().iter().map(|m| m.sender).collect();
    assert_eq!(senders, [Sender::User, Sender::Assistant].repeat(4));
    assert_eq!(
        assistant.surface().workbook().sheet_names(),
        vec!["Sheet1", "Budget_Template", "Data_Analysis", "Budget_Template_2"]
    );
    let active = assistant.surface().workbook().active_worksheet().unwrap();
    assert_eq!(active.name(), "Budget_Template_2");
    assert_eq!(
        assistant.status(),
        &Status::Success("Template created successfully!".into())
    );
}

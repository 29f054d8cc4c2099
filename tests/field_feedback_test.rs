mod common;

use common::{RecordingNotifier, controller_with, fast_config, filled_page};
use pse_checkout::application::feedback::DISABLED_BUTTON_LABEL;
use pse_checkout::domain::form::FormField;
use pse_checkout::domain::page::{Cursor, ElementId, FieldStatus};
use pse_checkout::infrastructure::in_memory::InMemoryPage;
use std::sync::Arc;

#[test]
fn test_blur_shows_one_error_per_invalid_field() {
    let page = Arc::new(InMemoryPage::new());
    let controller = controller_with(page.clone(), RecordingNotifier::new(), fast_config(), "", false);

    let cases = [
        (FormField::FullName, "A", "El nombre debe tener al menos 2 caracteres"),
        (FormField::Email, "ana@", "Ingresa un correo electrónico válido"),
        (FormField::Phone, "12ab", "Ingresa un número de teléfono válido"),
        (FormField::Document, "123", "El documento debe tener al menos 6 caracteres"),
    ];

    for (field, value, message) in cases {
        page.type_into(field, value);
        assert!(!controller.on_field_blur(field));

        let snapshot = page.snapshot();
        assert_eq!(snapshot.field_error(field), Some(message));
        let errors_for_field = snapshot
            .field_errors()
            .into_iter()
            .filter(|(f, _)| *f == field)
            .count();
        assert_eq!(errors_for_field, 1);
    }

    // Blurring again does not stack a second message
    assert!(!controller.on_field_blur(FormField::Email));
    assert_eq!(page.snapshot().field_errors().len(), 4);
}

#[test]
fn test_editing_a_field_clears_its_error() {
    let page = Arc::new(InMemoryPage::new());
    let controller = controller_with(page.clone(), RecordingNotifier::new(), fast_config(), "", false);

    page.type_into(FormField::Email, "not-an-email");
    controller.on_field_blur(FormField::Email);
    page.type_into(FormField::Document, "1");
    controller.on_field_blur(FormField::Document);

    page.type_into(FormField::Email, "ana@example.co");
    controller.on_field_input(FormField::Email);

    let snapshot = page.snapshot();
    assert_eq!(snapshot.field_status.get(&FormField::Email), None);
    // Other fields keep their own error
    assert!(snapshot.field_error(FormField::Document).is_some());
}

#[test]
fn test_valid_blur_marks_field_valid() {
    let page = Arc::new(filled_page());
    let controller = controller_with(page.clone(), RecordingNotifier::new(), fast_config(), "", false);

    for field in FormField::REQUIRED {
        assert!(controller.on_field_blur(field), "{field} rejected");
        assert_eq!(
            page.snapshot().field_status.get(&field),
            Some(&FieldStatus::Valid)
        );
    }
}

#[test]
fn test_corrected_field_loses_error_on_resubmit_validation() {
    let page = Arc::new(filled_page());
    let controller = controller_with(page.clone(), RecordingNotifier::new(), fast_config(), "", true);

    page.type_into(FormField::Document, "12");
    assert!(!controller.validate_form().is_valid());
    assert!(page.snapshot().field_error(FormField::Document).is_some());

    page.type_into(FormField::Document, "1020304050");
    assert!(controller.validate_form().is_valid());
    assert_eq!(page.snapshot().field_errors(), Vec::new());
}

#[test]
fn test_blur_on_missing_input_is_harmless() {
    let page = Arc::new(InMemoryPage::new().without_element(ElementId::Document));
    let controller = controller_with(page.clone(), RecordingNotifier::new(), fast_config(), "", false);

    assert!(controller.on_field_blur(FormField::Document));
    assert!(page.snapshot().field_status.is_empty());
}

#[test]
fn test_button_follows_terms_checkbox() {
    let page = Arc::new(filled_page());
    let controller = controller_with(page.clone(), RecordingNotifier::new(), fast_config(), "", false);

    let button = page.snapshot().button.expect("button rendered at startup");
    assert!(!button.enabled);
    assert_eq!(button.opacity, 0.5);
    assert_eq!(button.cursor, Cursor::NotAllowed);
    assert_eq!(button.label, DISABLED_BUTTON_LABEL);

    page.set_consent(true);
    controller.on_consent_changed();
    let button = page.snapshot().button.unwrap();
    assert!(button.enabled);
    assert_eq!(button.opacity, 1.0);
    assert_eq!(button.cursor, Cursor::Pointer);
    assert_eq!(button.label, "Pagar $15.000 COP →");

    page.set_consent(false);
    controller.on_consent_changed();
    assert!(!page.snapshot().button.unwrap().enabled);
}

use oakridge_backend::util::templates::{
    render_contact_business, render_contact_customer, render_quote_business,
    render_quote_customer, ContactEmailData, QuoteEmailData,
};

fn quote_data() -> QuoteEmailData {
    QuoteEmailData {
        tracking_id: "QR-2025-9ABC".to_string(),
        customer_name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "(555)123-4567".to_string(),
        service: "Kitchen Remodeling".to_string(),
        location: "Portland, OR".to_string(),
        message_html: "New counters<br>and an island".to_string(),
        message_text: "New counters\nand an island".to_string(),
        image_links: vec![
            "https://cdn.example.com/a.jpg".to_string(),
            "https://cdn.example.com/b.jpg".to_string(),
        ],
        submitted_at: "2025-08-05T10:00:00+00:00".to_string(),
    }
}

fn contact_data() -> ContactEmailData {
    ContactEmailData {
        tracking_id: "MSG-2025-9011".to_string(),
        full_name: "John Smith".to_string(),
        email: "john@example.com".to_string(),
        phone: "(555) 123-4567".to_string(),
        service: "Bathroom Remodeling".to_string(),
        heard_from: "A friend".to_string(),
        message_html: "Looking for a walk-in shower".to_string(),
        message_text: "Looking for a walk-in shower".to_string(),
        submitted_at: "2025-08-05T10:00:00+00:00".to_string(),
    }
}

#[test]
fn test_quote_customer_includes_reference_and_next_steps() {
    let rendered = render_quote_customer(&quote_data());
    assert!(rendered.subject.contains("QR-2025-9ABC"));
    assert!(rendered.html.contains("QR-2025-9ABC"));
    assert!(rendered.html.contains("Kitchen Remodeling"));
    assert!(rendered.html.contains("Portland, OR"));
    assert!(rendered.html.contains("2 photos"));
    assert!(rendered.html.contains("What happens next"));
    // text rendition carries the same information
    assert!(rendered.text.contains("QR-2025-9ABC"));
    assert!(rendered.text.contains("Kitchen Remodeling"));
    assert!(rendered.text.contains("What happens next"));
}

#[test]
fn test_quote_customer_singular_photo_label() {
    let mut data = quote_data();
    data.image_links.truncate(1);
    let rendered = render_quote_customer(&data);
    assert!(rendered.html.contains("1 photo"));
    assert!(!rendered.html.contains("1 photos"));
}

#[test]
fn test_quote_business_embeds_gallery() {
    let rendered = render_quote_business(&quote_data());
    assert_eq!(rendered.html.matches("<img src=").count(), 2);
    assert!(rendered.html.contains("https://cdn.example.com/a.jpg"));
    assert!(rendered.html.contains("https://cdn.example.com/b.jpg"));
    // plain text lists the links instead
    assert!(rendered.text.contains("- https://cdn.example.com/a.jpg"));
}

#[test]
fn test_quote_business_without_photos_has_no_gallery() {
    let mut data = quote_data();
    data.image_links.clear();
    let rendered = render_quote_business(&data);
    assert!(!rendered.html.contains("<img"));
    assert!(!rendered.text.contains("Photos ("));
}

#[test]
fn test_quote_business_carries_all_fields() {
    let rendered = render_quote_business(&quote_data());
    for expected in [
        "Jane Doe",
        "jane@example.com",
        "(555)123-4567",
        "Kitchen Remodeling",
        "Portland, OR",
    ] {
        assert!(rendered.html.contains(expected), "missing {}", expected);
        assert!(rendered.text.contains(expected), "missing {}", expected);
    }
    assert!(rendered.html.contains("New counters<br>and an island"));
    assert!(rendered.text.contains("New counters\nand an island"));
}

#[test]
fn test_empty_optional_fields_render_no_rows() {
    let mut data = quote_data();
    data.phone = String::new();
    data.location = String::new();
    let rendered = render_quote_business(&data);
    assert!(!rendered.html.contains("<td>Phone</td>"));
    assert!(!rendered.html.contains("<td>Location</td>"));
    assert!(!rendered.text.contains("Phone:"));
}

#[test]
fn test_contact_customer_includes_reference() {
    let rendered = render_contact_customer(&contact_data());
    assert!(rendered.subject.contains("OakRidge"));
    assert!(rendered.html.contains("MSG-2025-9011"));
    assert!(rendered.html.contains("John Smith"));
    assert!(rendered.text.contains("MSG-2025-9011"));
}

#[test]
fn test_contact_business_carries_all_fields() {
    let rendered = render_contact_business(&contact_data());
    assert!(rendered.subject.contains("John Smith"));
    assert!(rendered.subject.contains("MSG-2025-9011"));
    for expected in [
        "john@example.com",
        "(555) 123-4567",
        "Bathroom Remodeling",
        "A friend",
        "Looking for a walk-in shower",
    ] {
        assert!(rendered.html.contains(expected), "missing {}", expected);
        assert!(rendered.text.contains(expected), "missing {}", expected);
    }
}

#[test]
fn test_rendering_is_pure() {
    let data = quote_data();
    let first = render_quote_customer(&data);
    let second = render_quote_customer(&data);
    assert_eq!(first.subject, second.subject);
    assert_eq!(first.html, second.html);
    assert_eq!(first.text, second.text);
}

#[test]
fn test_every_rendition_pair_is_nonempty() {
    let quote = quote_data();
    let contact = contact_data();
    for rendered in [
        render_quote_customer(&quote),
        render_quote_business(&quote),
        render_contact_customer(&contact),
        render_contact_business(&contact),
    ] {
        assert!(!rendered.subject.is_empty());
        assert!(rendered.html.contains("<!DOCTYPE html>"));
        assert!(!rendered.text.is_empty());
        assert!(!rendered.text.contains('<'));
    }
}

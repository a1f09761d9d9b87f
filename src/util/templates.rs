//! Renderers for the four transactional messages the intake workflow sends.
//!
//! Each renderer is a pure function from pre-sanitized data to a
//! `{subject, html, text}` triple. Inputs are assumed to be cleaned by
//! `util::sanitize` already; nothing here escapes or performs I/O. Every
//! message carries an equivalent plain-text rendition for HTML-disabled
//! mail clients.

/// A fully rendered message, ready to hand to the email transport.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Sanitized fields of a persisted quote request, plus resolved photo links.
#[derive(Debug, Clone, Default)]
pub struct QuoteEmailData {
    pub tracking_id: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub location: String,
    pub message_html: String,
    pub message_text: String,
    pub image_links: Vec<String>,
    pub submitted_at: String,
}

/// Sanitized fields of a persisted contact message.
#[derive(Debug, Clone, Default)]
pub struct ContactEmailData {
    pub tracking_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub heard_from: String,
    pub message_html: String,
    pub message_text: String,
    pub submitted_at: String,
}

/// Shared document shell: header, content area, footer.
fn wrap_html(heading: &str, inner: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{heading}</title>
    <style>
        body {{
            font-family: Arial, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 600px;
            margin: 0 auto;
            padding: 20px;
        }}
        .header {{
            background-color: #2d4a3a;
            color: #ffffff;
            padding: 20px;
            text-align: center;
            border-radius: 8px 8px 0 0;
        }}
        .content {{
            background-color: #ffffff;
            padding: 30px;
            border: 1px solid #dee2e6;
        }}
        .summary {{
            background-color: #f8f9fa;
            border: 1px solid #dee2e6;
            border-radius: 4px;
            padding: 15px;
            margin: 20px 0;
        }}
        .summary td {{
            padding: 4px 8px;
            vertical-align: top;
        }}
        .summary td:first-child {{
            font-weight: bold;
            white-space: nowrap;
        }}
        .gallery img {{
            max-width: 260px;
            margin: 6px;
            border-radius: 4px;
        }}
        .footer {{
            background-color: #f8f9fa;
            padding: 15px;
            text-align: center;
            font-size: 12px;
            color: #6c757d;
            border-radius: 0 0 8px 8px;
        }}
    </style>
</head>
<body>
    <div class="header">
        <h1>OakRidge Remodeling</h1>
        <h2>{heading}</h2>
    </div>

    <div class="content">
{inner}
    </div>

    <div class="footer">
        <p>This is an automated message. Please do not reply to this email.</p>
        <p>&copy; OakRidge Remodeling. All rights reserved.</p>
    </div>
</body>
</html>"#,
        heading = heading,
        inner = inner
    )
}

/// One labeled row of the summary table; empty values render nothing.
fn summary_row(label: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    format!("            <tr><td>{label}</td><td>{value}</td></tr>\n")
}

/// Same idea for the plain-text rendition.
fn text_line(label: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    format!("{label}: {value}\n")
}

fn photo_count_label(count: usize) -> String {
    match count {
        0 => String::new(),
        1 => "1 photo".to_string(),
        n => format!("{} photos", n),
    }
}

/// Confirmation sent to the person who requested the quote.
pub fn render_quote_customer(data: &QuoteEmailData) -> RenderedEmail {
    let subject = format!(
        "Your quote request {} - OakRidge Remodeling",
        data.tracking_id
    );

    let photos = photo_count_label(data.image_links.len());
    let mut rows = String::new();
    rows.push_str(&summary_row("Reference", &data.tracking_id));
    rows.push_str(&summary_row("Service", &data.service));
    rows.push_str(&summary_row("Location", &data.location));
    rows.push_str(&summary_row("Photos attached", &photos));

    let inner = format!(
        r#"        <p>Hi {name},</p>

        <p>Thanks for requesting an estimate. We have your project details and
        a member of our team is already looking at them.</p>

        <div class="summary">
            <table>
{rows}            </table>
        </div>

        <p><strong>What happens next</strong></p>
        <ol>
            <li>We review your request within one business day.</li>
            <li>We call or email you to schedule a free on-site consultation.</li>
            <li>You receive a written, itemized estimate. No obligation.</li>
        </ol>

        <p>Keep the reference number above handy if you contact us about this
        request.</p>

        <p>Talk soon,<br>The OakRidge Remodeling Team</p>
"#,
        name = data.customer_name,
        rows = rows
    );

    let mut text = format!(
        "Hi {name},\n\n\
         Thanks for requesting an estimate. We have your project details and a\n\
         member of our team is already looking at them.\n\n",
        name = data.customer_name
    );
    text.push_str(&text_line("Reference", &data.tracking_id));
    text.push_str(&text_line("Service", &data.service));
    text.push_str(&text_line("Location", &data.location));
    text.push_str(&text_line("Photos attached", &photos));
    text.push_str(
        "\nWhat happens next:\n\
         1. We review your request within one business day.\n\
         2. We call or email you to schedule a free on-site consultation.\n\
         3. You receive a written, itemized estimate. No obligation.\n\n\
         Keep the reference number above handy if you contact us about this request.\n\n\
         Talk soon,\n\
         The OakRidge Remodeling Team\n",
    );

    RenderedEmail {
        subject,
        html: wrap_html("We received your quote request", &inner),
        text,
    }
}

/// Internal alert with the full submission, sent to the office inbox.
pub fn render_quote_business(data: &QuoteEmailData) -> RenderedEmail {
    let subject = format!("New quote request: {} [{}]", data.service, data.tracking_id);

    let mut rows = String::new();
    rows.push_str(&summary_row("Reference", &data.tracking_id));
    rows.push_str(&summary_row("Name", &data.customer_name));
    rows.push_str(&summary_row("Email", &data.email));
    rows.push_str(&summary_row("Phone", &data.phone));
    rows.push_str(&summary_row("Service", &data.service));
    rows.push_str(&summary_row("Location", &data.location));
    rows.push_str(&summary_row("Submitted", &data.submitted_at));

    let message_block = if data.message_html.is_empty() {
        String::new()
    } else {
        format!(
            r#"        <p><strong>Project description</strong></p>
        <div class="summary">{}</div>
"#,
            data.message_html
        )
    };

    let gallery = if data.image_links.is_empty() {
        String::new()
    } else {
        let imgs: String = data
            .image_links
            .iter()
            .map(|link| format!("            <img src=\"{}\" alt=\"project photo\">\n", link))
            .collect();
        format!(
            r#"        <p><strong>Photos ({count})</strong></p>
        <div class="gallery">
{imgs}        </div>
"#,
            count = data.image_links.len(),
            imgs = imgs
        )
    };

    let inner = format!(
        r#"        <p>A new quote request just came in through the website.</p>

        <div class="summary">
            <table>
{rows}            </table>
        </div>

{message_block}{gallery}        <p>Reply directly to the customer to schedule the consultation.</p>
"#,
    );

    let mut text = String::from("A new quote request just came in through the website.\n\n");
    text.push_str(&text_line("Reference", &data.tracking_id));
    text.push_str(&text_line("Name", &data.customer_name));
    text.push_str(&text_line("Email", &data.email));
    text.push_str(&text_line("Phone", &data.phone));
    text.push_str(&text_line("Service", &data.service));
    text.push_str(&text_line("Location", &data.location));
    text.push_str(&text_line("Submitted", &data.submitted_at));
    if !data.message_text.is_empty() {
        text.push_str(&format!("\nProject description:\n{}\n", data.message_text));
    }
    if !data.image_links.is_empty() {
        text.push_str(&format!("\nPhotos ({}):\n", data.image_links.len()));
        for link in &data.image_links {
            text.push_str(&format!("- {}\n", link));
        }
    }

    RenderedEmail {
        subject,
        html: wrap_html("New quote request", &inner),
        text,
    }
}

/// Confirmation sent to the person who used the contact form.
pub fn render_contact_customer(data: &ContactEmailData) -> RenderedEmail {
    let subject = "We received your message - OakRidge Remodeling".to_string();

    let mut rows = String::new();
    rows.push_str(&summary_row("Reference", &data.tracking_id));
    rows.push_str(&summary_row("Topic", &data.service));

    let inner = format!(
        r#"        <p>Hi {name},</p>

        <p>Thanks for getting in touch. Your message made it to us and we will
        reply within one business day.</p>

        <div class="summary">
            <table>
{rows}            </table>
        </div>

        <p>If anything is urgent, call the office and mention the reference
        number above.</p>

        <p>Talk soon,<br>The OakRidge Remodeling Team</p>
"#,
        name = data.full_name,
        rows = rows
    );

    let mut text = format!(
        "Hi {name},\n\n\
         Thanks for getting in touch. Your message made it to us and we will\n\
         reply within one business day.\n\n",
        name = data.full_name
    );
    text.push_str(&text_line("Reference", &data.tracking_id));
    text.push_str(&text_line("Topic", &data.service));
    text.push_str(
        "\nIf anything is urgent, call the office and mention the reference number above.\n\n\
         Talk soon,\n\
         The OakRidge Remodeling Team\n",
    );

    RenderedEmail {
        subject,
        html: wrap_html("We received your message", &inner),
        text,
    }
}

/// Internal alert for a new contact form message.
pub fn render_contact_business(data: &ContactEmailData) -> RenderedEmail {
    let subject = format!("New inquiry from {} [{}]", data.full_name, data.tracking_id);

    let mut rows = String::new();
    rows.push_str(&summary_row("Reference", &data.tracking_id));
    rows.push_str(&summary_row("Name", &data.full_name));
    rows.push_str(&summary_row("Email", &data.email));
    rows.push_str(&summary_row("Phone", &data.phone));
    rows.push_str(&summary_row("Service interest", &data.service));
    rows.push_str(&summary_row("Heard about us", &data.heard_from));
    rows.push_str(&summary_row("Submitted", &data.submitted_at));

    let inner = format!(
        r#"        <p>A new message just came in through the contact form.</p>

        <div class="summary">
            <table>
{rows}            </table>
        </div>

        <p><strong>Message</strong></p>
        <div class="summary">{message}</div>

        <p>Reply directly to the customer.</p>
"#,
        rows = rows,
        message = data.message_html
    );

    let mut text = String::from("A new message just came in through the contact form.\n\n");
    text.push_str(&text_line("Reference", &data.tracking_id));
    text.push_str(&text_line("Name", &data.full_name));
    text.push_str(&text_line("Email", &data.email));
    text.push_str(&text_line("Phone", &data.phone));
    text.push_str(&text_line("Service interest", &data.service));
    text.push_str(&text_line("Heard about us", &data.heard_from));
    text.push_str(&text_line("Submitted", &data.submitted_at));
    text.push_str(&format!("\nMessage:\n{}\n", data.message_text));

    RenderedEmail {
        subject,
        html: wrap_html("New contact message", &inner),
        text,
    }
}

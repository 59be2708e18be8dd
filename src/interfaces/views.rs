//! Server-rendered pages for the contact flow.

use ammonia::clean_text;

use crate::entities::contact::ContactForm;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="id">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="/css/style.css">
</head>
<body>
  <main class="container">
{body}
  </main>
</body>
</html>
"#,
        title = clean_text(title),
        body = body,
    )
}

fn input(label: &str, name: &str, kind: &str, value: &str) -> String {
    format!(
        r#"    <label for="{name}">{label}</label>
    <input type="{kind}" id="{name}" name="{name}" value="{value}">
"#,
        label = clean_text(label),
        value = clean_text(value),
    )
}

/// Contact form, optionally with an error banner and the previous input.
pub fn contact_page(error_message: Option<&str>, old_values: &ContactForm) -> String {
    let alert = error_message
        .map(|msg| {
            format!(
                "    <div class=\"alert alert-danger\" role=\"alert\">{}</div>\n",
                clean_text(msg)
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"    <h1>Get In Touch</h1>
{alert}    <form action="/contact" method="POST">
{name}{email}{phone}{subject}    <label for="message">Your message</label>
    <textarea id="message" name="message" rows="5">{message}</textarea>
    <button type="submit">Submit</button>
    </form>
"#,
        name = input("Name", "name", "text", &old_values.name),
        email = input("Email", "email", "email", &old_values.email),
        phone = input("Phone Number", "phone", "tel", &old_values.phone),
        subject = input("Subject", "subject", "text", &old_values.subject),
        message = clean_text(&old_values.message),
    );

    layout("Contact Me", &body)
}

pub fn contact_after_page() -> String {
    layout(
        "Terima Kasih",
        r#"    <h1>Terima kasih!</h1>
    <p>Pesan Anda sudah kami terima.</p>
    <a href="/home">Kembali ke beranda</a>
"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_echoed_values() {
        let form = ContactForm {
            name: "<script>alert(1)</script>".into(),
            ..Default::default()
        };
        let page = contact_page(Some("Nomor telepon harus berupa angka."), &form);

        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains("role=\"alert\""));
    }

    #[test]
    fn blank_form_has_no_alert() {
        let page = contact_page(None, &ContactForm::default());
        assert!(!page.contains("role=\"alert\""));
        assert!(page.contains("action=\"/contact\""));
    }

    #[test]
    fn confirmation_page_renders() {
        assert!(contact_after_page().contains("Terima kasih!"));
    }
}

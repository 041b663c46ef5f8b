use anyhow::Context;
use aws_sdk_sesv2 as ses;
use ses::types::{Body, Content, Destination, EmailContent, Message};

/// The content of an email, either plain text or html
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailBody {
    Text(String),
    Html(String),
}

fn utf8_content(data: &str) -> anyhow::Result<Content> {
    Content::builder()
        .data(data)
        .charset("UTF-8")
        .build()
        .context("building Content")
}

fn build_body(body: &EmailBody) -> anyhow::Result<Body> {
    let body = match body {
        EmailBody::Text(text) => Body::builder().text(utf8_content(text)?).build(),
        EmailBody::Html(html) => Body::builder().html(utf8_content(html)?).build(),
    };
    Ok(body)
}

#[tracing::instrument(skip(client, body))]
pub(crate) async fn send_email(
    client: &ses::Client,
    from_email: &str,
    to_email: &str,
    subject: &str,
    body: &EmailBody,
) -> anyhow::Result<String> {
    let dest = Destination::builder().to_addresses(to_email).build();

    let msg = Message::builder()
        .subject(utf8_content(subject)?)
        .body(build_body(body)?)
        .build();

    let email_content = EmailContent::builder().simple(msg).build();

    let output = client
        .send_email()
        .from_email_address(from_email)
        .destination(dest)
        .content(email_content)
        .send()
        .await
        .context("failed to send email")?;

    Ok(output.message_id.unwrap_or_default())
}

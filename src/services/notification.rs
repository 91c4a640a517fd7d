use chrono::NaiveDate;

use crate::models::Appointment;

const SELF_PICKUP_NOTE: &str = "Self-service (customer will pick up)";

/// Footer details identifying the business that sent the notification.
#[derive(Debug, Clone)]
pub struct BusinessInfo {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// e.g. "Sunday, June 15, 2025"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn compose(appt: &Appointment, business: &BusinessInfo, to: &str) -> NotificationEmail {
    NotificationEmail {
        to: to.to_string(),
        subject: format!("New Laundry Service Request - {}", appt.name),
        text: render_text(appt, business),
        html: render_html(appt, business),
    }
}

fn render_text(appt: &Appointment, business: &BusinessInfo) -> String {
    let mut out = String::from("New service request received:\n\nCustomer Information:\n");
    out.push_str(&format!("- Name: {}\n", appt.name));
    out.push_str(&format!("- Phone: {}\n", appt.phone));
    out.push_str(&format!("- Service Type: {}\n", appt.service_type.display_name()));
    if let Some(load) = &appt.load_size {
        out.push_str(&format!("- Load Size: {load}\n"));
    }
    if let Some(addr) = &appt.pickup_address {
        out.push_str(&format!("- Pickup Address: {addr}\n"));
    }

    out.push_str("\nService Details:\n");
    out.push_str(&format!("- Service Date: {}\n", format_date(appt.drop_off_date)));
    match appt.pickup_date {
        Some(date) => out.push_str(&format!("- Pickup Date: {}\n", format_date(date))),
        None => out.push_str(&format!("- {SELF_PICKUP_NOTE}\n")),
    }
    if let Some(notes) = &appt.special_instructions {
        out.push_str(&format!("- Special Instructions: {notes}\n"));
    }

    out.push_str(&format!(
        "\nPlease contact the customer at {} to confirm the service.\n\n---\n\
         This email was sent from the {} website.\n\
         Address: {}\n",
        appt.phone, business.name, business.address
    ));
    out
}

const P_STYLE: &str = "color: #1c1e21; margin: 8px 0;";
const LINK_STYLE: &str = "color: #1877F2; text-decoration: none;";

fn field(label: &str, value_html: &str) -> String {
    format!("<p style=\"{P_STYLE}\"><strong>{label}:</strong> {value_html}</p>\n")
}

fn render_html(appt: &Appointment, business: &BusinessInfo) -> String {
    let phone = escape_html(&appt.phone);
    let phone_link = format!("<a href=\"tel:{phone}\" style=\"{LINK_STYLE}\">{phone}</a>");

    let mut customer = String::new();
    customer.push_str(&field("Name", &escape_html(&appt.name)));
    customer.push_str(&field("Phone", &phone_link));
    customer.push_str(&field("Service Type", &escape_html(appt.service_type.display_name())));
    if let Some(load) = &appt.load_size {
        customer.push_str(&field("Load Size", &escape_html(load)));
    }
    if let Some(addr) = &appt.pickup_address {
        customer.push_str(&field("Pickup Address", &escape_html(addr)));
    }

    let mut details = String::new();
    details.push_str(&field("Service Date", &format_date(appt.drop_off_date)));
    match appt.pickup_date {
        Some(date) => details.push_str(&field("Pickup Date", &format_date(date))),
        None => details.push_str(&field("Pickup", SELF_PICKUP_NOTE)),
    }
    if let Some(notes) = &appt.special_instructions {
        details.push_str(&field("Special Instructions", &escape_html(notes)));
    }

    format!(
        r#"<div style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; max-width: 600px; margin: 0 auto; background-color: #ffffff;">
<div style="background: linear-gradient(135deg, #1877F2 0%, #166FE5 100%); padding: 30px; text-align: center; border-radius: 8px 8px 0 0;">
<h2 style="color: #ffffff; margin: 0; font-size: 24px;">New Laundry Service Request</h2>
</div>
<div style="padding: 30px;">
<div style="background-color: #f0f2f5; padding: 20px; border-radius: 8px; margin-bottom: 20px; border: 1px solid #dadde1;">
<h3 style="color: #1c1e21; margin-top: 0; font-size: 18px; font-weight: 600;">Customer Information</h3>
{customer}</div>
<div style="background-color: #e7f3ff; padding: 20px; border-radius: 8px; margin-bottom: 20px; border: 1px solid #1877F2;">
<h3 style="color: #1c1e21; margin-top: 0; font-size: 18px; font-weight: 600;">Service Details</h3>
{details}</div>
<div style="background-color: #f0f2f5; padding: 15px; border-radius: 8px; text-align: center; border: 1px solid #dadde1;">
<p style="color: #65676b; font-size: 14px; margin: 0;">Please contact the customer at <a href="tel:{phone}" style="{LINK_STYLE} font-weight: 600;">{phone}</a> to confirm the service.</p>
</div>
<hr style="border: none; border-top: 1px solid #dadde1; margin: 30px 0;">
<p style="color: #65676b; font-size: 12px; text-align: center; margin: 0;">This email was sent from the {name} website.<br>Address: {address}</p>
</div>
</div>
"#,
        name = escape_html(&business.name),
        address = escape_html(&business.address),
    )
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

//! Message texts sent to visitors and hosts.

use crate::domain::types::DEFAULT_PURPOSE;

pub struct Message {
    pub subject: String,
    pub body: String,
}

pub fn otc_email(code: &str) -> Message {
    Message {
        subject: "Your Verification Code".to_owned(),
        body: format!(
            "Your verification code is {code}. This code will expire in 5 minutes. \n\n\
             If you did not request this code, please ignore this email."
        ),
    }
}

/// Host alert. Phone channels ignore the subject.
pub fn arrival_alert(visitor_name: &str, visitor_phone: &str, purpose: &str) -> Message {
    let purpose = match purpose.trim() {
        "" => DEFAULT_PURPOSE,
        p => p,
    };
    Message {
        subject: format!("Visitor Alert: {visitor_name} has arrived"),
        body: format!(
            "{visitor_name} (Phone: {visitor_phone}) has arrived to meet you for {purpose}.\n\n\
             Please proceed to the reception area to meet your visitor."
        ),
    }
}

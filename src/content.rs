//! Static copy for the support and settings pages.

pub struct ContactMethod {
    pub title: &'static str,
    pub detail: &'static str,
    pub availability: &'static str,
    pub action: &'static str,
}

pub const CONTACT_METHODS: [ContactMethod; 3] = [
    ContactMethod {
        title: "Live Chat",
        detail: "Chat with our support team",
        availability: "Available now",
        action: "Start Chat",
    },
    ContactMethod {
        title: "Email Support",
        detail: "support@jobconcierge.com",
        availability: "Response within 24 hours",
        action: "Send Email",
    },
    ContactMethod {
        title: "Phone Support",
        detail: "1-800-JOB-HELP",
        availability: "Mon-Fri, 9AM-6PM EST",
        action: "Call Now",
    },
];

pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FAQS: [Faq; 6] = [
    Faq {
        question: "How many applications can I submit per month?",
        answer: "It depends on your plan: Silver allows 60 applications/month, Gold allows 100, \
                 and Career LaunchPad allows 200+ applications per month.",
    },
    Faq {
        question: "How long does it take to optimize a resume?",
        answer: "Resumes are typically optimized within 2-4 hours. Roles that need manual \
                 review may take up to 24 hours.",
    },
    Faq {
        question: "Can I request changes to my optimized resume?",
        answer: "Yes. Revisions are unlimited: contact your strategist or edit the summary \
                 from the Resume Versions page.",
    },
    Faq {
        question: "What is the ATS score and why does it matter?",
        answer: "The ATS (Applicant Tracking System) score estimates how well your resume \
                 performs when scanned by automated screening. A score of 90+ significantly \
                 improves your chances of passing the first screen.",
    },
    Faq {
        question: "How do I prepare for interviews?",
        answer: "Career LaunchPad members get personalized prep sessions. Every member can use \
                 the interview guide library and request coaching calls.",
    },
    Faq {
        question: "Can I upgrade or downgrade my plan?",
        answer: "Yes, at any time. Upgrades apply immediately; downgrades apply at the start of \
                 your next billing cycle.",
    },
];

pub struct NotificationPreference {
    pub label: &'static str,
    pub description: &'static str,
    pub enabled: bool,
}

pub const NOTIFICATION_PREFERENCES: [NotificationPreference; 4] = [
    NotificationPreference {
        label: "Email notifications",
        description: "Application updates and interview invites",
        enabled: true,
    },
    NotificationPreference {
        label: "SMS alerts",
        description: "Urgent interview reminders",
        enabled: true,
    },
    NotificationPreference {
        label: "Weekly report",
        description: "Pipeline summary every Monday",
        enabled: true,
    },
    NotificationPreference {
        label: "Marketing emails",
        description: "Product news and tips",
        enabled: false,
    },
];

pub const ASSISTANT_OFFLINE: &str =
    "Offline Mode: connect to the live database to unlock AI-powered insights.";
pub const ASSISTANT_ONLINE: &str =
    "Analyzing Pipeline... fetching your latest career data to generate personalized strategies.";

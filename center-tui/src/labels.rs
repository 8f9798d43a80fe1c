use center_common::Locale;

use crate::command::Usage;

/// Fixed UI strings for one locale.
pub struct Labels {
    pub app_title: &'static str,
    pub vin: &'static str,
    pub branch: &'static str,
    pub assignee: &'static str,
    pub photos: &'static str,
    pub videos: &'static str,
    pub comments: &'static str,
    pub no_records: &'static str,
    pub activity: &'static str,
    pub input: &'static str,
    pub chart_recurring: &'static str,
    pub chart_claims: &'static str,
    pub chart_tickets: &'static str,
    pub welcome: &'static str,
    pub claim_created: &'static str,
    pub ticket_created: &'static str,
    pub rejected: &'static str,
    pub unknown_command: &'static str,
    pub unknown_view: &'static str,
    pub help: &'static [&'static str],
}

const AR: Labels = Labels {
    app_title: "مركز الخدمة",
    vin: "رقم الشاصي",
    branch: "الفرع",
    assignee: "المسؤول",
    photos: "صور",
    videos: "فيديو",
    comments: "تعليقات",
    no_records: "لا توجد سجلات",
    activity: "النشاط",
    input: "الأوامر (/help)",
    chart_recurring: "أكثر المشاكل تكراراً في الضمان",
    chart_claims: "حالات مطالبات الضمان",
    chart_tickets: "حالات تذاكر الدعم الفني",
    welcome: "اكتب /help لعرض الأوامر المتاحة.",
    claim_created: "تم إنشاء مطالبة ضمان",
    ticket_created: "تم إنشاء تذكرة دعم",
    rejected: "تعذر الإنشاء",
    unknown_command: "أمر غير معروف",
    unknown_view: "شاشة غير معروفة",
    help: &[
        "/claim VIN | الفرع | المشكلة [| التقرير الفني]   مطالبة ضمان جديدة",
        "/ticket الفرع | normal|urgent | المشكلة [| التقرير]   تذكرة دعم جديدة",
        "/view warranty|support|analytics   تبديل الشاشة (أو Tab، F1-F3)",
        "/quit   خروج (أو Ctrl-C)",
    ],
};

const EN: Labels = Labels {
    app_title: "Service Center",
    vin: "VIN",
    branch: "Branch",
    assignee: "Assignee",
    photos: "photos",
    videos: "videos",
    comments: "comments",
    no_records: "No records",
    activity: "Activity",
    input: "Command (/help)",
    chart_recurring: "Most recurring warranty issues",
    chart_claims: "Warranty claim statuses",
    chart_tickets: "Support ticket statuses",
    welcome: "Type /help to list the available commands.",
    claim_created: "Warranty claim created",
    ticket_created: "Support ticket created",
    rejected: "Could not create record",
    unknown_command: "Unknown command",
    unknown_view: "Unknown view",
    help: &[
        "/claim VIN | branch | issue [| technical report]   new warranty claim",
        "/ticket branch | normal|urgent | issue [| report]   new support ticket",
        "/view warranty|support|analytics   switch view (or Tab, F1-F3)",
        "/quit   exit (or Ctrl-C)",
    ],
};

pub fn labels(locale: Locale) -> &'static Labels {
    match locale {
        Locale::Ar => &AR,
        Locale::En => &EN,
    }
}

pub fn overdue_banner(locale: Locale, hours: i64) -> String {
    match locale {
        Locale::Ar => format!("⚠ متأخرة: تجاوزت {hours} ساعة دون حل"),
        Locale::En => format!("⚠ Overdue: open for more than {hours} hours"),
    }
}

pub fn usage(locale: Locale, usage: Usage) -> &'static str {
    let help = labels(locale).help;
    match usage {
        Usage::Claim => help[0],
        Usage::Ticket => help[1],
        Usage::View => help[2],
    }
}

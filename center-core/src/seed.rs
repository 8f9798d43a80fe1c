//! Built-in sample records, used when no dataset file is configured.
//!
//! Timestamps are relative to `now` so ages and overdue flags look the same
//! whenever the dashboard starts.

use chrono::{DateTime, Duration, Utc};

use crate::dataset::Dataset;
use crate::model::{Attachment, Branch, Comment, MediaKind, SupportTicket, WarrantyClaim};
use crate::status::{ClaimStatus, TicketPriority, TicketStatus};

struct ClaimRow {
    id: &'static str,
    vin: &'static str,
    branch: Branch,
    issue: &'static str,
    report: &'static str,
    status: ClaimStatus,
    age_hours: i64,
    touched_hours: i64,
    photos: usize,
    videos: usize,
}

const CLAIMS: &[ClaimRow] = &[
    ClaimRow {
        id: "WC-001",
        vin: "1HGCM82633A004352",
        branch: Branch::Riyadh,
        issue: "تسريب زيت المحرك",
        report: "تسريب من جوان غطاء البلوف، يحتاج تغيير الجوان.",
        status: ClaimStatus::Pending,
        age_hours: 5,
        touched_hours: 2,
        photos: 3,
        videos: 1,
    },
    ClaimRow {
        id: "WC-002",
        vin: "JN1AZ4EH8FM730841",
        branch: Branch::Jeddah,
        issue: "عطل في ناقل الحركة",
        report: "تأخر في التعشيق عند التحويل من الوضع P إلى D.",
        status: ClaimStatus::Approved,
        age_hours: 72,
        touched_hours: 30,
        photos: 1,
        videos: 2,
    },
    ClaimRow {
        id: "WC-003",
        vin: "5YJSA1E26HF176521",
        branch: Branch::Dammam,
        issue: "تسريب زيت المحرك",
        report: "تسريب من الكرتير، البراغي مشدودة بشكل صحيح.",
        status: ClaimStatus::RevisionNeeded,
        age_hours: 26,
        touched_hours: 20,
        photos: 2,
        videos: 0,
    },
    ClaimRow {
        id: "WC-004",
        vin: "WDBRF61J43F421839",
        branch: Branch::Riyadh,
        issue: "ضعف التبريد في المكيف",
        report: "ضغط الفريون منخفض، لا يوجد تسريب ظاهر.",
        status: ClaimStatus::Rejected,
        age_hours: 240,
        touched_hours: 200,
        photos: 1,
        videos: 0,
    },
    ClaimRow {
        id: "WC-005",
        vin: "2T1BURHE0JC074215",
        branch: Branch::Khobar,
        issue: "عطل في ناقل الحركة",
        report: "صوت طقطقة عند التسارع، تم تبديل حساس السرعة.",
        status: ClaimStatus::Invoiced,
        age_hours: 900,
        touched_hours: 700,
        photos: 4,
        videos: 1,
    },
    ClaimRow {
        id: "WC-006",
        vin: "3VWFE21C04M000001",
        branch: Branch::Makkah,
        issue: "تسريب زيت المحرك",
        report: "تسريب من حساس ضغط الزيت.",
        status: ClaimStatus::Pending,
        age_hours: 1,
        touched_hours: 0,
        photos: 2,
        videos: 0,
    },
    ClaimRow {
        id: "WC-007",
        vin: "KMHCT4AE3CU123456",
        branch: Branch::Jeddah,
        issue: "خلل في نظام الملاحة",
        report: "الشاشة تعيد التشغيل عند توصيل الهاتف.",
        status: ClaimStatus::Approved,
        age_hours: 120,
        touched_hours: 96,
        photos: 0,
        videos: 1,
    },
];

struct TicketRow {
    id: &'static str,
    branch: Branch,
    issue: &'static str,
    report: &'static str,
    priority: TicketPriority,
    status: TicketStatus,
    age_hours: i64,
    assignee: Option<&'static str>,
}

const TICKETS: &[TicketRow] = &[
    TicketRow {
        id: "ST-001",
        branch: Branch::Riyadh,
        issue: "جهاز فحص الأعطال لا يتصل",
        report: "الجهاز لا يتعرف على منفذ OBD في الموديلات الحديثة.",
        priority: TicketPriority::Urgent,
        status: TicketStatus::Open,
        age_hours: 60,
        assignee: None,
    },
    TicketRow {
        id: "ST-002",
        branch: Branch::Jeddah,
        issue: "طلب تحديث برمجي لوحدة التحكم",
        report: "التحديث متوفر لدى الوكيل، بانتظار رابط التحميل.",
        priority: TicketPriority::Normal,
        status: TicketStatus::InProgress,
        age_hours: 20,
        assignee: Some("م. سامي"),
    },
    TicketRow {
        id: "ST-003",
        branch: Branch::Dammam,
        issue: "رافعة السيارات متوقفة",
        report: "عطل في المضخة الهيدروليكية.",
        priority: TicketPriority::Urgent,
        status: TicketStatus::Solved,
        age_hours: 96,
        assignee: Some("م. فهد"),
    },
    TicketRow {
        id: "ST-004",
        branch: Branch::Khobar,
        issue: "استفسار عن إجراءات الضمان الممدد",
        report: "",
        priority: TicketPriority::Normal,
        status: TicketStatus::InProgress,
        age_hours: 50,
        assignee: Some("أ. نورة"),
    },
    TicketRow {
        id: "ST-005",
        branch: Branch::Makkah,
        issue: "نقص في قطع الغيار",
        report: "فلاتر الزيت لموديلات 2024 غير متوفرة.",
        priority: TicketPriority::Normal,
        status: TicketStatus::Open,
        age_hours: 3,
        assignee: None,
    },
];

fn media(id: &str, photos: usize, videos: usize) -> Vec<Attachment> {
    let photo = (1..=photos).map(|n| Attachment {
        kind: MediaKind::Photo,
        reference: format!("media/{id}/photo-{n}.jpg"),
    });
    let video = (1..=videos).map(|n| Attachment {
        kind: MediaKind::Video,
        reference: format!("media/{id}/video-{n}.mp4"),
    });
    photo.chain(video).collect()
}

/// The sample dataset, with ages measured back from `now`.
pub fn seed_dataset(now: DateTime<Utc>) -> Dataset {
    let claims = CLAIMS
        .iter()
        .map(|row| {
            let created_at = now - Duration::hours(row.age_hours);
            let updated_at = now - Duration::hours(row.touched_hours);
            let comments = if row.status == ClaimStatus::RevisionNeeded {
                vec![Comment {
                    author: "مراجع الضمان".into(),
                    text: "يرجى إرفاق صورة لرقم الشاصي.".into(),
                    timestamp: updated_at,
                }]
            } else {
                Vec::new()
            };
            WarrantyClaim {
                id: row.id.into(),
                vehicle_vin: row.vin.into(),
                branch: row.branch,
                issue: row.issue.into(),
                technical_report: row.report.into(),
                attachments: media(row.id, row.photos, row.videos),
                status: row.status,
                created_at,
                updated_at,
                comments,
            }
        })
        .collect();

    let tickets = TICKETS
        .iter()
        .map(|row| {
            let created_at = now - Duration::hours(row.age_hours);
            SupportTicket {
                id: row.id.into(),
                branch: row.branch,
                issue: row.issue.into(),
                technical_report: row.report.into(),
                attachments: Vec::new(),
                priority: row.priority,
                status: row.status,
                created_at,
                updated_at: created_at + Duration::hours(row.age_hours / 2),
                assigned_to: row.assignee.map(Into::into),
                comments: Vec::new(),
            }
        })
        .collect();

    Dataset { claims, tickets }
}

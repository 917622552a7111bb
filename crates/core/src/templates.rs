use serde_json::json;

use crate::models::{OutboundMessage, QuickReplyOption};

pub const PACKAGE_INTRO_TEXT: &str = "นี่คือแพ็กเกจประกันยอดนิยมของเราค่ะ/ครับ:";
pub const PACKAGE_FOLLOW_UP_TEXT: &str = "สนใจข้อมูลอื่นๆ เพิ่มเติมไหมคะ/ครับ?";
pub const CLAIM_PROMPT_TEXT: &str = "รับทราบค่ะ ต้องการ *เริ่ม* แจ้งเคลมเลยใช่ไหมคะ? หรือมีคำถามเกี่ยวกับขั้นตอนคะ? (ถ้าต้องการถาม ให้พิมพ์ข้อความคำถามมาเลย)";
pub const GREETING_TEXT: &str =
    "สวัสดีค่ะ/ครับ ยินดีให้บริการค่ะ/ครับ คุณต้องการให้ดิฉันช่วยเรื่องใดคะ?";
pub const GENERATION_APOLOGY_TEXT: &str =
    "ขออภัยค่ะ เกิดข้อผิดพลาดในการเชื่อมต่อกับระบบ AI กรุณาลองใหม่อีกครั้งค่ะ";

pub const PACKAGE_CARD_ALT_TEXT: &str = "รายละเอียดแพ็กเกจประกันยอดนิยม";
pub const PACKAGE_PRICE: &str = "14,999";
pub const PACKAGE_BENEFITS: [&str; 3] = [
    "ซ่อมศูนย์ในเครือทั้งหมด",
    "คุ้มครองภัยธรรมชาติและน้ำท่วม",
    "บริการช่วยเหลือฉุกเฉิน 24 ชม.",
];
pub const QUOTE_REQUEST_TEXT: &str = "ต้องการใบเสนอราคาสำหรับประกันชั้น 1";
pub const HOTLINE_URI: &str = "tel:021234567";

const MAIN_MENU: [QuickReplyOption; 3] = [
    QuickReplyOption::new("📞 แจ้งเคลมด่วน", "แจ้งเคลม"),
    QuickReplyOption::new("✅ ดูแพ็กเกจ", "ดูแพ็กเกจ"),
    QuickReplyOption::new("📍 หาศูนย์ซ่อม", "ศูนย์ซ่อม"),
];

const CLAIM_OPTIONS: [QuickReplyOption; 2] = [
    QuickReplyOption::new("🚗 เริ่มแจ้งเคลมตอนนี้", "เริ่มเคลม"),
    QuickReplyOption::new("❌ ยกเลิก/คุยกับคน", "คุยกับเจ้าหน้าที่"),
];

pub fn quick_reply_menu() -> [QuickReplyOption; 3] {
    MAIN_MENU
}

pub fn claim_quick_replies() -> [QuickReplyOption; 2] {
    CLAIM_OPTIONS
}

pub fn package_card() -> OutboundMessage {
    let benefit_rows = PACKAGE_BENEFITS
        .iter()
        .map(|benefit| {
            json!({
                "type": "box",
                "layout": "baseline",
                "spacing": "sm",
                "contents": [
                    { "type": "text", "text": "✅", "color": "#1DB446", "size": "sm", "flex": 1 },
                    { "type": "text", "text": benefit, "color": "#666666", "size": "sm", "flex": 5 }
                ]
            })
        })
        .collect::<Vec<_>>();

    OutboundMessage::Flex {
        alt_text: PACKAGE_CARD_ALT_TEXT.to_string(),
        contents: json!({
            "type": "bubble",
            "body": {
                "type": "box",
                "layout": "vertical",
                "contents": [
                    {
                        "type": "text",
                        "text": "✨ แพ็กเกจประกันชั้น 1 (A+)",
                        "weight": "bold",
                        "color": "#00B900",
                        "size": "sm"
                    },
                    {
                        "type": "text",
                        "text": "คุ้มครองครบวงจร",
                        "weight": "bold",
                        "size": "xl",
                        "margin": "md"
                    },
                    {
                        "type": "box",
                        "layout": "vertical",
                        "margin": "lg",
                        "spacing": "sm",
                        "contents": benefit_rows
                    },
                    { "type": "separator", "margin": "xxl" },
                    {
                        "type": "box",
                        "layout": "horizontal",
                        "margin": "md",
                        "contents": [
                            {
                                "type": "text",
                                "text": "ราคาเริ่มต้น:",
                                "size": "sm",
                                "color": "#AAAAAA",
                                "flex": 2
                            },
                            {
                                "type": "text",
                                "text": format!("{} บาท/ปี", PACKAGE_PRICE),
                                "size": "sm",
                                "color": "#000000",
                                "align": "end",
                                "flex": 3,
                                "weight": "bold"
                            }
                        ]
                    }
                ]
            },
            "footer": {
                "type": "box",
                "layout": "vertical",
                "spacing": "sm",
                "contents": [
                    {
                        "type": "button",
                        "style": "primary",
                        "height": "sm",
                        "action": {
                            "type": "message",
                            "label": "ขอใบเสนอราคา",
                            "text": QUOTE_REQUEST_TEXT
                        }
                    },
                    {
                        "type": "button",
                        "style": "secondary",
                        "height": "sm",
                        "action": {
                            "type": "uri",
                            "label": "โทรหาเจ้าหน้าที่ (24 ชม.)",
                            "uri": HOTLINE_URI
                        }
                    }
                ]
            }
        }),
    }
}

use std::sync::Arc;

use insure_core::{GenerationOutcome, GenerationRequest};
use insure_observability::AppMetrics;
use tracing::{error, info};
use unicode_segmentation::UnicodeSegmentation;

use crate::channel::GenerationBackend;

pub const SYSTEM_INSTRUCTION: &str = "คุณคือผู้ช่วย Chatbot สำหรับบริษัทประกันภัยเท่านั้น หน้าที่ของคุณคือตอบคำถามเกี่ยวกับผลิตภัณฑ์ประกันภัย, การเคลม, และบริการหลังการขาย

คำสั่งสำคัญ:
1. ห้ามตอบคำถามที่ไม่เกี่ยวข้องกับประกันภัย, การเงิน, หรือบริการของบริษัทประกัน (เช่น ชีวะ, เคมี, ประวัติศาสตร์, สูตรอาหาร, การเมือง, ข่าวทั่วไป).
2. หากได้รับคำถามที่ไม่เกี่ยวข้อง ให้ตอบอย่างสุภาพว่า \"ขออภัยค่ะ/ครับ ดิฉันเป็น Chatbot ผู้เชี่ยวชาญด้านประกันภัยเท่านั้น ไม่สามารถตอบคำถามในหัวข้อนี้ได้ค่ะ/ครับ\".
3. ตอบกลับด้วยภาษาไทยเท่านั้น.";

const LOG_PREVIEW_GRAPHEMES: usize = 100;

pub struct GenerationClient<B> {
    backend: B,
    metrics: Arc<AppMetrics>,
}

impl<B> GenerationClient<B>
where
    B: GenerationBackend,
{
    pub fn new(backend: B, metrics: Arc<AppMetrics>) -> Self {
        Self { backend, metrics }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn generate(&self, user_text: &str) -> GenerationOutcome {
        let request = GenerationRequest {
            prompt: user_text.to_string(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
        };

        match self.backend.generate_content(&request).await {
            Ok(text) => {
                info!(preview = %preview(&text), "generation succeeded");
                GenerationOutcome::Generated(text)
            }
            Err(err) => {
                self.metrics.inc_generation_failure();
                error!(error = %err, "generation backend call failed");
                GenerationOutcome::Unavailable
            }
        }
    }
}

fn preview(text: &str) -> String {
    let mut graphemes = text.graphemes(true);
    let head: String = graphemes.by_ref().take(LOG_PREVIEW_GRAPHEMES).collect();
    if graphemes.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

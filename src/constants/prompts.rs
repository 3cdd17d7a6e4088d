use crate::models::dto::request::GenerationRequest;

/// Header rows and summary rows the matrix table must follow.
const MATRIX_TEMPLATE: &str = r#"YÊU CẦU CẤU TRÚC MA TRẬN (STRICT TEMPLATE):
Bảng ma trận phải có cấu trúc header tầng nấc như sau:
- Hàng 1: TT, Chủ đề/chương, Nội dung/đơn vị kiến thức, Mức độ đánh giá (colspan=12), Tổng (colspan=3), Tỉ lệ % điểm.
- Hàng 2 (dưới Mức độ đánh giá): TNKQ (colspan=9), Tự luận (colspan=3), Biết (dưới Tổng), Hiểu (dưới Tổng), Vận dụng (dưới Tổng).
- Hàng 3 (dưới TNKQ): Nhiều lựa chọn (colspan=3), Đúng-Sai (colspan=3), Trả lời ngắn (colspan=3), Biết (dưới Tự luận), Hiểu (dưới Tự luận), Vận dụng (dưới Tự luận).
- Hàng 4 (dưới cùng): Biết, Hiểu, Vận dụng (lặp lại cho từng cột Nhiều lựa chọn, Đúng-Sai, Trả lời ngắn).

YÊU CẦU CÁC DÒNG TỔNG KẾT (CUỐI BẢNG MA TRẬN):
Bắt buộc phải có đủ 3 dòng cuối cùng:
1. Dòng: TỔNG SỐ CÂU (Thống kê số câu theo từng cột mức độ).
2. Dòng: TỔNG SỐ ĐIỂM (Thống kê điểm số theo từng cột mức độ, ngay dưới dòng Tổng số câu).
3. Dòng: TỈ LỆ % (Thống kê tỉ lệ % theo các mức độ nhận thức Biết/Hiểu/Vận dụng)."#;

const SPEC_TABLE_TEMPLATE: &str = r#"YÊU CẦU CẤU TRÚC BẢNG ĐẶC TẢ:
- Các cột: TT, Chủ đề/chương, Nội dung/đơn vị kiến thức, Yêu cầu cần đạt, Mức độ đánh giá (Cấu trúc cột Mức độ đánh giá giống hệt Ma trận bên trên, cũng phải có 3 dòng tổng kết ở cuối)."#;

const PAPER_STRUCTURE: &str = r#"CẤU TRÚC ĐỀ THI:
- 70% Trắc nghiệm - 30% Tự luận.
- Phải có đủ 3 dạng TN: MCQ (A/B/C/D), Đúng-Sai (4 ý), Trả lời ngắn.
- Tự luận tập trung vận dụng thực tiễn."#;

const RESPONSE_FORMAT: &str = r#"ĐỊNH DẠNG TRẢ VỀ:
- 'matrix' và 'specTable': Mã HTML <table> với border="1", sử dụng rowspan và colspan chính xác để khớp mẫu.
- 'examPaper': Đề thi thuần văn bản.
- 'answerKey': Đáp án thuần văn bản."#;

/// Builds the single instruction sent to the generation service.
pub fn build_exam_prompt(request: &GenerationRequest) -> String {
    let institution = request.institution_name.trim();

    format!(
        "Bạn là chuyên gia khảo thí tại {institution}. Hãy soạn bộ hồ sơ đề kiểm tra chuẩn mực cho:
- Môn: {subject}, Lớp: {grade}
- Phạm vi: {scope}
- Thời gian: {duration}, Thang điểm: {scale}
- Đơn vị: {institution}

YÊU CẦU QUAN TRỌNG VỀ ĐỊNH DẠNG:
1. TUYỆT ĐỐI KHÔNG ghi các dòng tiêu đề hành chính cấp trên như \"UBND HUYỆN...\", \"PHÒNG GIÁO DỤC VÀ ĐÀO TẠO...\".
2. Phần đầu đề thi và đáp án chỉ bắt đầu trực tiếp từ tên trường: \"{institution_upper}\".
3. KHÔNG sử dụng các ký tự Markdown (*, #). Sử dụng văn bản hành chính thuần túy.

{MATRIX_TEMPLATE}

{SPEC_TABLE_TEMPLATE}

{PAPER_STRUCTURE}

{RESPONSE_FORMAT}
",
        subject = request.subject.trim(),
        grade = request.grade_level.trim(),
        scope = request.scope_phrase().trim(),
        duration = request.duration_label.trim(),
        scale = request.score_scale.trim(),
        institution_upper = institution.to_uppercase(),
    )
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::lectures::requests::{LectureRequest, LectureSubjectPath};
use crate::services::LectureService;
use crate::utils::{SafeClassId, SafeLectureDate};

// 懒加载的全局 LECTURE_SERVICE 实例
static LECTURE_SERVICE: Lazy<LectureService> = Lazy::new(LectureService::new_lazy);

pub async fn add_lecture(
    req: HttpRequest,
    class_id: SafeClassId,
    date: SafeLectureDate,
    lecture_data: web::Json<LectureRequest>,
) -> ActixResult<HttpResponse> {
    LECTURE_SERVICE
        .add_lecture(&req, class_id.0, date.0, lecture_data.into_inner())
        .await
}

pub async fn list_lectures(
    req: HttpRequest,
    class_id: SafeClassId,
    date: SafeLectureDate,
) -> ActixResult<HttpResponse> {
    LECTURE_SERVICE
        .list_lectures(&req, class_id.0, date.0)
        .await
}

pub async fn update_lecture(
    req: HttpRequest,
    class_id: SafeClassId,
    date: SafeLectureDate,
    lecture_data: web::Json<LectureRequest>,
) -> ActixResult<HttpResponse> {
    LECTURE_SERVICE
        .update_lecture(&req, class_id.0, date.0, lecture_data.into_inner())
        .await
}

pub async fn delete_lectures_by_date(
    req: HttpRequest,
    class_id: SafeClassId,
    date: SafeLectureDate,
) -> ActixResult<HttpResponse> {
    LECTURE_SERVICE
        .delete_lectures_by_date(&req, class_id.0, date.0)
        .await
}

pub async fn delete_lectures_by_subject_code(
    req: HttpRequest,
    class_id: SafeClassId,
    date: SafeLectureDate,
    path: web::Path<LectureSubjectPath>,
) -> ActixResult<HttpResponse> {
    LECTURE_SERVICE
        .delete_lectures_by_subject_code(&req, class_id.0, date.0, path.into_inner().subject_code)
        .await
}

// 挂载在 /v1/class 作用域下
pub fn configure_lectures_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{class_id}/lectures/{date}")
            .route(web::post().to(add_lecture))
            .route(web::get().to(list_lectures))
            .route(web::put().to(update_lecture))
            .route(web::delete().to(delete_lectures_by_date)),
    )
    .service(
        web::resource("/{class_id}/lectures/{date}/{subject_code}")
            .route(web::delete().to(delete_lectures_by_subject_code)),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};

    use crate::routes::test_support::{memory_storage, test_app};

    fn lecture(subject_code: &str, start_time: &str) -> Value {
        json!({
            "subject_code": subject_code,
            "teacher_id": "665f1c2a9d3e4b0012345678",
            "start_time": start_time,
            "end_time": "11:00"
        })
    }

    macro_rules! create_class {
        ($app:expr) => {{
            let req = test::TestRequest::post()
                .uri("/v1/class")
                .set_json(json!({ "class_name": "Grade 9 B", "class_number": 9, "type": "boys" }))
                .to_request();
            let created: Value = test::call_and_read_body_json(&$app, req).await;
            created["id"].as_str().unwrap().to_string()
        }};
    }

    #[actix_web::test]
    async fn test_add_then_list_lectures() {
        let storage = memory_storage();
        let app = test_app!(storage);
        let id = create_class!(app);
        let uri = format!("/v1/class/{id}/lectures/2024-05-01");

        for body in [lecture("MATH01", "09:00"), lecture("PHYS01", "10:00")] {
            let req = test::TestRequest::post().uri(&uri).set_json(body).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            assert!(test::read_body(resp).await.is_empty());
        }

        // 编码后的 YYYY/MM/DD 指向同一天
        let req = test::TestRequest::get()
            .uri(&format!("/v1/class/{id}/lectures/2024%2F05%2F01"))
            .to_request();
        let lectures: Value = test::call_and_read_body_json(&app, req).await;
        let codes: Vec<&str> = lectures
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["subject_code"].as_str().unwrap())
            .collect();
        assert_eq!(codes, vec!["MATH01", "PHYS01"]);
        assert_eq!(lectures[0]["teacher_id"], json!("665f1c2a9d3e4b0012345678"));

        let req = test::TestRequest::get()
            .uri(&format!("/v1/class/{id}"))
            .to_request();
        let class: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(class["lectures"].as_array().unwrap().len(), 1);
        assert_eq!(class["lectures"][0]["date"], json!("2024-05-01"));
    }

    #[actix_web::test]
    async fn test_invalid_teacher_id_is_nulled() {
        let storage = memory_storage();
        let app = test_app!(storage);
        let id = create_class!(app);
        let uri = format!("/v1/class/{id}/lectures/2024-05-02");

        let mut body = lecture("CHEM01", "08:00");
        body["teacher_id"] = json!("not-an-id");
        let req = test::TestRequest::post().uri(&uri).set_json(body).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri(&uri).to_request();
        let lectures: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(lectures[0]["teacher_id"], Value::Null);
    }

    #[actix_web::test]
    async fn test_non_string_fields_are_accepted() {
        let storage = memory_storage();
        let app = test_app!(storage);
        let id = create_class!(app);
        let uri = format!("/v1/class/{id}/lectures/2024-05-03");

        let req = test::TestRequest::post()
            .uri(&uri)
            .set_json(json!({
                "subject_code": "MATH01",
                "teacher_id": 12345,
                "start_time": 900,
                "end_time": 1000
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri(&uri).to_request();
        let lectures: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(lectures[0]["teacher_id"], Value::Null);
        assert_eq!(lectures[0]["start_time"], json!("900"));
        assert_eq!(lectures[0]["end_time"], json!("1000"));
    }

    #[actix_web::test]
    async fn test_add_rejects_invalid_input() {
        let storage = memory_storage();
        let app = test_app!(storage);
        let id = create_class!(app);

        let req = test::TestRequest::post()
            .uri(&format!("/v1/class/{id}/lectures/2024-02-30"))
            .set_json(lecture("MATH01", "09:00"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"][0]["param"], json!("date"));
        assert_eq!(body["errors"][0]["location"], json!("params"));

        let req = test::TestRequest::post()
            .uri(&format!("/v1/class/{id}/lectures/2024-05-01"))
            .set_json(json!({ "subject_code": "MATH" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        let params: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["param"].as_str().unwrap())
            .collect();
        assert_eq!(params, vec!["subject_code", "start_time", "end_time"]);
    }

    #[actix_web::test]
    async fn test_add_to_unknown_class() {
        let storage = memory_storage();
        let app = test_app!(storage);

        let req = test::TestRequest::post()
            .uri(&format!(
                "/v1/class/{}/lectures/2024-05-01",
                bson::oid::ObjectId::new()
            ))
            .set_json(lecture("MATH01", "09:00"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(test::read_body(resp).await.is_empty());
    }

    #[actix_web::test]
    async fn test_list_is_empty_for_unknown_day() {
        let storage = memory_storage();
        let app = test_app!(storage);
        let id = create_class!(app);

        let req = test::TestRequest::get()
            .uri(&format!("/v1/class/{id}/lectures/2030-01-01"))
            .to_request();
        let lectures: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(lectures, json!([]));
    }

    #[actix_web::test]
    async fn test_update_replaces_matching_lecture() {
        let storage = memory_storage();
        let app = test_app!(storage);
        let id = create_class!(app);
        let uri = format!("/v1/class/{id}/lectures/2024-05-01");

        let req = test::TestRequest::post()
            .uri(&uri)
            .set_json(lecture("MATH01", "09:00"))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::put()
            .uri(&uri)
            .set_json(lecture("MATH01", "13:00"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        // 不存在的科目也返回 200，不做任何修改
        let req = test::TestRequest::put()
            .uri(&uri)
            .set_json(lecture("HIST01", "13:00"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri(&uri).to_request();
        let lectures: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(lectures.as_array().unwrap().len(), 1);
        assert_eq!(lectures[0]["start_time"], json!("13:00"));
    }

    #[actix_web::test]
    async fn test_delete_by_subject_then_by_date() {
        let storage = memory_storage();
        let app = test_app!(storage);
        let id = create_class!(app);
        let uri = format!("/v1/class/{id}/lectures/2024-05-01");

        for body in [
            lecture("MATH01", "09:00"),
            lecture("PHYS01", "10:00"),
            lecture("MATH01", "14:00"),
        ] {
            let req = test::TestRequest::post().uri(&uri).set_json(body).to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::delete()
            .uri(&format!("{uri}/MATH01"))
            .to_request();
        let removed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(removed.as_array().unwrap().len(), 2);

        // 科目代码不做格式校验，没有匹配时返回空数组
        let req = test::TestRequest::delete()
            .uri(&format!("{uri}/MATH"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let removed: Value = test::read_body_json(resp).await;
        assert_eq!(removed, json!([]));

        let req = test::TestRequest::delete().uri(&uri).to_request();
        let removed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(removed[0]["subject_code"], json!("PHYS01"));

        // 再次删除时分组已不存在
        let req = test::TestRequest::delete().uri(&uri).to_request();
        let removed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(removed, json!([]));

        let req = test::TestRequest::get()
            .uri(&format!("/v1/class/{id}"))
            .to_request();
        let class: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(class["lectures"], json!([]));
    }
}

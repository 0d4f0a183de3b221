pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use bson::oid::ObjectId;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::models::lectures::requests::LectureRequest;
use crate::storage::Storage;

pub struct LectureService {
    storage: Option<Arc<dyn Storage>>,
}

impl LectureService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 为班级某天新增课程
    pub async fn add_lecture(
        &self,
        request: &HttpRequest,
        class_id: ObjectId,
        date: NaiveDate,
        lecture_data: LectureRequest,
    ) -> ActixResult<HttpResponse> {
        create::add_lecture(self, request, class_id, date, lecture_data).await
    }

    // 按科目代码替换某天的课程
    pub async fn update_lecture(
        &self,
        request: &HttpRequest,
        class_id: ObjectId,
        date: NaiveDate,
        lecture_data: LectureRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_lecture(self, request, class_id, date, lecture_data).await
    }

    pub async fn list_lectures(
        &self,
        request: &HttpRequest,
        class_id: ObjectId,
        date: NaiveDate,
    ) -> ActixResult<HttpResponse> {
        list::list_lectures(self, request, class_id, date).await
    }

    // 删除某天全部课程
    pub async fn delete_lectures_by_date(
        &self,
        request: &HttpRequest,
        class_id: ObjectId,
        date: NaiveDate,
    ) -> ActixResult<HttpResponse> {
        delete::delete_lectures_by_date(self, request, class_id, date).await
    }

    // 删除某天指定科目的课程
    pub async fn delete_lectures_by_subject_code(
        &self,
        request: &HttpRequest,
        class_id: ObjectId,
        date: NaiveDate,
        subject_code: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_lectures_by_subject_code(self, request, class_id, date, subject_code).await
    }
}

//! Classroom and roster endpoints.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use classroom_core::model::ClassroomId;

use crate::error::ClientError;
use crate::http::ApiClient;

/// A classroom owned by the logged-in teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    pub id: ClassroomId,
    pub name: String,
}

/// A student's membership in a classroom, as the roster endpoints report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentEnrollment {
    pub username: String,
    #[serde(default)]
    pub classroom_id: Option<ClassroomId>,
}

#[derive(Deserialize)]
struct ClassroomsResponse {
    classrooms: Vec<Classroom>,
}

#[derive(Serialize)]
struct CreateClassroomRequest<'a> {
    name: &'a str,
}

impl ApiClient {
    #[instrument(skip(self))]
    pub async fn list_classrooms(&self) -> Result<Vec<Classroom>, ClientError> {
        let request = self.authorized(self.http().get(self.url("/classrooms")))?;
        let response = self.send(request, "classrooms").await?;
        let body: ClassroomsResponse = Self::decode(response).await?;
        Ok(body.classrooms)
    }

    #[instrument(skip(self))]
    pub async fn create_classroom(&self, name: &str) -> Result<Classroom, ClientError> {
        let request = self.authorized(
            self.http()
                .post(self.url("/classrooms"))
                .json(&CreateClassroomRequest { name }),
        )?;
        let response = self.send(request, "classrooms").await?;
        let classroom: Classroom = Self::decode(response).await?;
        info!(id = classroom.id, "classroom created");
        Ok(classroom)
    }

    #[instrument(skip(self))]
    pub async fn delete_classroom(&self, classroom_id: ClassroomId) -> Result<(), ClientError> {
        let request = self.authorized(
            self.http()
                .delete(self.url("/classrooms"))
                .query(&[("classroomId", classroom_id)]),
        )?;
        self.send(request, &format!("classroom {classroom_id}"))
            .await?;
        Ok(())
    }

    /// Enroll a student by username.
    #[instrument(skip(self))]
    pub async fn add_student(
        &self,
        classroom_id: ClassroomId,
        student: &str,
    ) -> Result<StudentEnrollment, ClientError> {
        let request = self.authorized(
            self.http()
                .put(self.url(&format!("/classrooms/{classroom_id}")))
                .query(&[("studentUsername", student)]),
        )?;
        self.roster_change(request, classroom_id, student).await
    }

    #[instrument(skip(self))]
    pub async fn drop_student(
        &self,
        classroom_id: ClassroomId,
        student: &str,
    ) -> Result<StudentEnrollment, ClientError> {
        let request = self.authorized(
            self.http()
                .delete(self.url(&format!("/classrooms/{classroom_id}")))
                .query(&[("studentUsername", student)]),
        )?;
        self.roster_change(request, classroom_id, student).await
    }

    /// Link a parent account to an enrolled student. `None` clears the link.
    #[instrument(skip(self))]
    pub async fn set_parent(
        &self,
        classroom_id: ClassroomId,
        student: &str,
        parent: Option<&str>,
    ) -> Result<StudentEnrollment, ClientError> {
        let mut params = vec![("studentUsername", student)];
        if let Some(parent) = parent {
            params.push(("parentUsername", parent));
        }
        let request = self.authorized(
            self.http()
                .patch(self.url(&format!("/classrooms/{classroom_id}")))
                .query(&params),
        )?;
        self.roster_change(request, classroom_id, student).await
    }

    async fn roster_change(
        &self,
        request: reqwest::RequestBuilder,
        classroom_id: ClassroomId,
        student: &str,
    ) -> Result<StudentEnrollment, ClientError> {
        let response = self
            .send(request, &format!("student {student} in classroom {classroom_id}"))
            .await?;
        // Some deployments answer roster changes with an empty body.
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        if body.trim().is_empty() {
            return Ok(StudentEnrollment {
                username: student.to_string(),
                classroom_id: Some(classroom_id),
            });
        }
        serde_json::from_str(&body)
            .map_err(|e| ClientError::Decode(format!("failed to parse response: {e}")))
    }
}

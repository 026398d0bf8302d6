//! The eleven registry cases.

use canopy_domain::{
    ApiInfo, CreatedMonkey, DeleteAck, ErrorBody, FetchedMonkey, GeneratedDescription,
    MonkeyDraft, MonkeyRef, ResponseData, UpdatedMonkey, ValidationErrors, contains_monkey,
    generate_id,
};

use super::{CORS_HEADERS, RegistryTester};
use crate::check::{CallError, CallResult, Checked, ensure, expect_json};
use crate::ports::{HttpClient, HttpClientError};

const MISSING_FIELDS: &str = "Missing required fields in response";

fn body_of(draft: &MonkeyDraft) -> CallResult<serde_json::Value> {
    draft
        .to_body()
        .map_err(|e| CallError::Transport(HttpClientError::InvalidBody(e.to_string())))
}

fn monkey_path(monkey_id: &str) -> String {
    format!("/monkeys/{monkey_id}")
}

impl<C: HttpClient> RegistryTester<C> {
    /// `GET /` answers 200 with a banner naming the service.
    pub fn test_api_root(&mut self) {
        const NAME: &str = "API Root Endpoint";
        const UNEXPECTED: &str = "Unexpected response format";

        let outcome = self.session.get("/").map_err(CallError::from).and_then(|response| {
            let info: Checked<ApiInfo> = expect_json(&response, 200, UNEXPECTED)?;
            ensure(
                info.contract.message.contains(&self.service_name),
                UNEXPECTED,
                &info.payload,
            )?;
            Ok("Root endpoint accessible".to_string())
        });
        self.finish(NAME, outcome);
    }

    /// `GET /monkeys` answers 200 with an array, possibly empty.
    pub fn test_get_all_monkeys_empty(&mut self) {
        const NAME: &str = "GET All Monkeys (Initial)";

        let outcome = self
            .session
            .get("/monkeys")
            .map_err(CallError::from)
            .and_then(|response| {
                let list: Checked<Vec<serde_json::Value>> =
                    expect_json(&response, 200, "Response is not a list")?;
                Ok(format!("Retrieved {} monkeys", list.contract.len()))
            });
        self.finish(NAME, outcome);
    }

    /// `POST /monkeys` creates the fixture and echoes it with an id, which
    /// is kept for the cases that follow.
    pub fn test_create_monkey(&mut self) {
        const NAME: &str = "POST Create Monkey";
        let draft = MonkeyDraft::charlie();

        let outcome = body_of(&draft)
            .and_then(|body| Ok(self.session.post("/monkeys", body)?))
            .and_then(|response| {
                let created: Checked<CreatedMonkey> =
                    expect_json(&response, 201, MISSING_FIELDS)?;
                ensure(created.contract.echoes(&draft), MISSING_FIELDS, &created.payload)?;
                Ok(created.contract)
            });

        match outcome {
            Ok(created) => {
                let message = format!("Created monkey with ID: {}", created.id_display());
                self.test_monkey_id = created.id_text();
                self.log_test(NAME, true, message, None);
            }
            Err(e) => self.record(e.into_result(NAME)),
        }
    }

    /// `GET /monkeys` now lists the created monkey.
    pub fn test_get_all_monkeys_with_data(&mut self) {
        const NAME: &str = "GET All Monkeys (With Data)";
        const INVALID: &str = "Empty list or invalid format";

        let outcome = self
            .session
            .get("/monkeys")
            .map_err(CallError::from)
            .and_then(|response| {
                let list: Checked<Vec<MonkeyRef>> = expect_json(&response, 200, INVALID)?;
                ensure(!list.contract.is_empty(), INVALID, &list.payload)?;
                let found = self
                    .test_monkey_id
                    .as_deref()
                    .is_some_and(|id| contains_monkey(&list.contract, id));
                ensure(found, "Test monkey not found in list", &list.payload)?;
                Ok(format!(
                    "Retrieved {} monkeys including test monkey",
                    list.contract.len()
                ))
            });
        self.finish(NAME, outcome);
    }

    /// `GET /monkeys/{id}` returns the created monkey.
    pub fn test_get_specific_monkey(&mut self) {
        const NAME: &str = "GET Specific Monkey";
        let Some(monkey_id) = self.require_monkey_id(NAME) else {
            return;
        };

        let outcome = self
            .session
            .get(&monkey_path(&monkey_id))
            .map_err(CallError::from)
            .and_then(|response| {
                let fetched: Checked<FetchedMonkey> =
                    expect_json(&response, 200, "Unexpected response format")?;
                ensure(
                    fetched.contract.has_id(&monkey_id),
                    "Monkey ID mismatch",
                    &fetched.payload,
                )?;
                Ok(format!("Retrieved monkey: {}", fetched.contract.name_display()))
            });
        self.finish(NAME, outcome);
    }

    /// `PUT /monkeys/{id}` applies the updated fixture and echoes it.
    pub fn test_update_monkey(&mut self) {
        const NAME: &str = "PUT Update Monkey";
        const MISMATCH: &str = "Update data mismatch";
        let Some(monkey_id) = self.require_monkey_id(NAME) else {
            return;
        };
        let draft = MonkeyDraft::charlie_updated();

        let outcome = body_of(&draft)
            .and_then(|body| Ok(self.session.put(&monkey_path(&monkey_id), body)?))
            .and_then(|response| {
                let updated: Checked<UpdatedMonkey> = expect_json(&response, 200, MISMATCH)?;
                ensure(updated.contract.matches(&draft), MISMATCH, &updated.payload)?;
                Ok(format!("Updated monkey: {}", updated.contract.name_display()))
            });
        self.finish(NAME, outcome);
    }

    /// `POST /generate-description` returns prose and a timestamp.
    pub fn test_ai_description_generation(&mut self) {
        const NAME: &str = "POST AI Description";
        let draft = MonkeyDraft::charlie();

        let outcome = body_of(&draft)
            .and_then(|body| Ok(self.session.post("/generate-description", body)?))
            .and_then(|response| {
                let generated: Checked<GeneratedDescription> =
                    expect_json(&response, 200, MISSING_FIELDS)?;
                Ok(format!(
                    "Generated description ({} chars)",
                    generated.contract.char_count()
                ))
            });
        self.finish(NAME, outcome);
    }

    /// `POST /monkeys` with an all-invalid record answers 400 with errors.
    pub fn test_validation_errors(&mut self) {
        const NAME: &str = "Validation Errors";

        let outcome = body_of(&MonkeyDraft::invalid())
            .and_then(|body| Ok(self.session.post("/monkeys", body)?))
            .and_then(|response| {
                let rejected: Checked<ValidationErrors> =
                    expect_json(&response, 400, "No errors field in response")?;
                ensure(
                    !rejected.contract.is_empty(),
                    "Empty errors field in response",
                    &rejected.payload,
                )?;
                Ok(format!(
                    "Correctly rejected invalid data with {} errors",
                    rejected.contract.len()
                ))
            });
        self.finish_expecting(NAME, outcome);
    }

    /// `GET /monkeys/{random id}` answers 404 with an error.
    pub fn test_not_found_errors(&mut self) {
        const NAME: &str = "404 Error Handling";
        let fake_id = generate_id();

        let outcome = self
            .session
            .get(&monkey_path(&fake_id))
            .map_err(CallError::from)
            .and_then(|response| {
                let _: Checked<ErrorBody> =
                    expect_json(&response, 404, "No error field in 404 response")?;
                Ok("Correctly returned 404 for non-existent monkey".to_string())
            });
        self.finish_expecting(NAME, outcome);
    }

    /// `GET /monkeys` carries CORS headers and a JSON content type. Each is
    /// recorded as its own outcome.
    pub fn test_response_headers(&mut self) {
        const CORS: &str = "CORS Headers";
        const CONTENT_TYPE: &str = "Content Type";

        let response = match self.session.get("/monkeys") {
            Ok(response) => response,
            Err(e) => {
                let error = CallError::from(e);
                self.record(error.clone().into_result(CORS));
                self.record(error.into_result(CONTENT_TYPE));
                return;
            }
        };

        let missing: Vec<&str> = CORS_HEADERS
            .iter()
            .copied()
            .filter(|header| !response.has_header(header))
            .collect();
        if missing.is_empty() {
            self.log_test(CORS, true, "All CORS headers present", None);
        } else {
            self.log_test(
                CORS,
                false,
                format!("Missing headers: {}", missing.join(", ")),
                None,
            );
        }

        let content_type = response.get_header("content-type").cloned().unwrap_or_default();
        if content_type.contains("application/json") {
            self.log_test(CONTENT_TYPE, true, "Correct JSON content type", None);
        } else {
            self.log_test(
                CONTENT_TYPE,
                false,
                format!("Unexpected content type: {content_type}"),
                None,
            );
        }
    }

    /// `DELETE /monkeys/{id}` acknowledges, and a follow-up fetch is 404.
    pub fn test_delete_monkey(&mut self) {
        const NAME: &str = "DELETE Monkey";
        const VERIFY: &str = "DELETE Verification";
        let Some(monkey_id) = self.require_monkey_id(NAME) else {
            return;
        };
        let path = monkey_path(&monkey_id);

        let outcome = self
            .session
            .delete(&path)
            .map_err(CallError::from)
            .and_then(|response| {
                let _: Checked<DeleteAck> =
                    expect_json(&response, 200, "No message field in response")?;
                Ok("Successfully deleted monkey".to_string())
            });
        let deleted = outcome.is_ok();
        self.finish(NAME, outcome);
        if !deleted {
            return;
        }

        match self.session.get(&path) {
            Ok(response) if response.status == 404 => {
                self.log_test(VERIFY, true, "Monkey no longer exists after deletion", None);
            }
            Ok(response) => self.log_test(
                VERIFY,
                false,
                "Monkey still exists after deletion",
                Some(ResponseData::Text(response.body)),
            ),
            Err(e) => self.record(CallError::from(e).into_result(VERIFY)),
        }
    }
}

use super::LayoutCommandService;
use crate::{
    application::{
        dto::SaveComponentDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::layout::{
        ComponentClass, ComponentInstance, FieldData, LayoutRejection, NewPlacement, PageSlug,
        SpotId, SubmissionEncoding,
    },
};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub struct SaveComponentCommand {
    pub page_slug: String,
    pub spot: String,
    pub component: String,
    pub fields: FieldData,
    pub encoding: SubmissionEncoding,
}

impl SaveComponentCommand {
    /// Split a raw submission into the placement address (`component`, `spot`)
    /// and the component's own fields.
    pub fn from_submission(
        page_slug: impl Into<String>,
        mut submission: FieldData,
        encoding: SubmissionEncoding,
    ) -> ApplicationResult<Self> {
        let component = take_text(&mut submission, "component")?;
        let spot = take_text(&mut submission, "spot")?;
        Ok(Self {
            page_slug: page_slug.into(),
            spot,
            component,
            fields: submission,
            encoding,
        })
    }
}

fn take_text(submission: &mut FieldData, key: &str) -> ApplicationResult<String> {
    match submission.remove(key) {
        Some(Value::String(value)) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        Some(Value::String(_)) | None | Some(Value::Null) => {
            Err(ApplicationError::validation(format!("{key} is required")))
        }
        Some(_) => Err(ApplicationError::validation(format!("{key} must be a string"))),
    }
}

impl LayoutCommandService {
    /// Upsert the component placed at (page, spot).
    ///
    /// Runs in one unit of work: the page is created if needed, a placement with
    /// a different component is removed before the new one is written, and a
    /// placement with the same component is rebuilt on top of its stored data.
    pub async fn save_component(
        &self,
        command: SaveComponentCommand,
    ) -> ApplicationResult<SaveComponentDto> {
        let page_slug = PageSlug::new(command.page_slug)?;
        let class = self
            .registry
            .resolve_class(&command.component)
            .cloned()
            .ok_or_else(|| ApplicationError::UnknownComponent(command.component.clone()))?;
        let spot = SpotId::new(command.spot.clone())
            .map_err(|_| ApplicationError::UnknownSpot(command.spot.clone()))?;
        self.ensure_placeable(&page_slug, &spot, &class)?;

        let now = self.clock.now();
        let mut uow = self.repo.begin().await?;
        let page = uow.find_or_create_page(&page_slug, now).await?;

        let (base, replaced) = match uow.find_placement(page.id, &spot).await? {
            Some(current) if &current.component == class.slug() => (Some(current.data), true),
            Some(stale) => {
                info!(
                    page = %page_slug,
                    spot = %spot,
                    previous = %stale.component,
                    component = %class.slug(),
                    "replacing component in spot"
                );
                uow.remove_placement(stale.id).await?;
                (None, true)
            }
            None => (None, false),
        };

        let fields = match command.encoding {
            SubmissionEncoding::Form => class.normalize_form(command.fields),
            SubmissionEncoding::Json => command.fields,
        };
        let instance =
            ComponentInstance::from_submission(Arc::clone(&class), base.as_ref(), &fields)?;

        uow.put_placement(NewPlacement {
            page_id: page.id,
            spot: spot.clone(),
            component: class.slug().clone(),
            data: instance.into_data(),
            now,
        })
        .await?;
        uow.touch_page(page.id, now).await?;
        uow.commit().await?;

        info!(
            page = %page_slug,
            spot = %spot,
            component = %class.slug(),
            page_created = page.created,
            "component saved"
        );

        Ok(SaveComponentDto {
            page_created: page.created,
            placement_replaced: replaced,
        })
    }

    fn ensure_placeable(
        &self,
        page: &PageSlug,
        spot: &SpotId,
        class: &ComponentClass,
    ) -> ApplicationResult<()> {
        self.registry
            .accepts(page, spot, class)
            .map_err(|rejection| match rejection {
                LayoutRejection::UnknownSpot => ApplicationError::UnknownSpot(spot.to_string()),
                LayoutRejection::NotEligible => ApplicationError::ComponentNotAllowed {
                    component: class.slug().to_string(),
                    spot: spot.to_string(),
                },
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission(value: Value) -> FieldData {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn from_submission_separates_address_from_fields() {
        let command = SaveComponentCommand::from_submission(
            "home",
            submission(json!({ "component": "banner", "spot": " hero ", "title": "Hi" })),
            SubmissionEncoding::Json,
        )
        .unwrap();
        assert_eq!(command.component, "banner");
        assert_eq!(command.spot, "hero");
        assert_eq!(command.fields, submission(json!({ "title": "Hi" })));
    }

    #[test]
    fn from_submission_requires_component_and_spot() {
        let err = SaveComponentCommand::from_submission(
            "home",
            submission(json!({ "spot": "hero" })),
            SubmissionEncoding::Form,
        )
        .err()
        .unwrap();
        assert!(matches!(err, ApplicationError::Validation(msg) if msg == "component is required"));

        let err = SaveComponentCommand::from_submission(
            "home",
            submission(json!({ "component": "banner", "spot": 3 })),
            SubmissionEncoding::Json,
        )
        .err()
        .unwrap();
        assert!(matches!(err, ApplicationError::Validation(_)));
    }
}

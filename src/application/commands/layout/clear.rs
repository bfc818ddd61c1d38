use super::LayoutCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::layout::{PageSlug, SpotId},
};
use tracing::info;

pub struct ClearSpotCommand {
    pub page_slug: String,
    pub spot: String,
}

pub struct DeletePageCommand {
    pub page_slug: String,
}

impl LayoutCommandService {
    /// Remove whatever component occupies (page, spot).
    pub async fn clear_spot(&self, command: ClearSpotCommand) -> ApplicationResult<()> {
        let page_slug = PageSlug::new(command.page_slug)?;
        let spot = SpotId::new(command.spot)?;

        let mut uow = self.repo.begin().await?;
        let page_id = uow
            .find_page_id(&page_slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("page not found"))?;
        let placement = uow
            .find_placement(page_id, &spot)
            .await?
            .ok_or_else(|| ApplicationError::not_found("no component in spot"))?;

        uow.remove_placement(placement.id).await?;
        uow.touch_page(page_id, self.clock.now()).await?;
        uow.commit().await?;

        info!(page = %page_slug, spot = %spot, "spot cleared");
        Ok(())
    }

    pub async fn delete_page(&self, command: DeletePageCommand) -> ApplicationResult<()> {
        let page_slug = PageSlug::new(command.page_slug)?;
        if !self.repo.delete_page(&page_slug).await? {
            return Err(ApplicationError::not_found("page not found"));
        }
        info!(page = %page_slug, "page layout deleted");
        Ok(())
    }
}

use utoipa::OpenApi;

use crate::gateway::handlers;
use crate::gateway::types;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::world::get_world,
        handlers::entities::list_entities,
        handlers::entities::get_entity,
        handlers::actions::submit_actions,
        handlers::market::list_listings,
        handlers::market::create_listing,
        handlers::market::buy_listing,
        handlers::market::cancel_listing,
        handlers::currency::currency_metadata,
        handlers::currency::get_balance,
        handlers::currency::transfer,
        handlers::currency::mint_encrypted,
        handlers::currency::list_packets,
        handlers::currency::decrypt,
        handlers::events::list_events,
        handlers::admin::advance_tick,
        handlers::admin::reset_world,
        handlers::admin::verify_replay,
    ),
    components(schemas(
        types::CurrencyMetadataResponse,
        types::DenominationInfo,
        types::WorldResponse,
        types::EntityResponse,
        types::SubmitActionsRequest,
        types::SubmitActionsResponse,
        types::ListingResponse,
        types::CreateListingRequest,
        types::BalanceResponse,
        types::TransferRequest,
        types::MintEncryptedRequest,
        types::PacketResponse,
        types::DecryptRequest,
        types::DecryptResponse,
        types::EventResponse,
        types::ReplayVerifyResponse,
        types::AdvanceTickResponse,
    ))
)]
pub struct ApiDoc;

//! AeroCast REST client
//!
//! Every session-bearing request goes through [`AeroCastClient::authorize`]
//! before it is sent and through [`AeroCastClient::dispatch`] when the answer
//! comes back. Those two hooks own the whole token lifecycle on the wire:
//!
//! - no stored token: the request goes out without credentials
//! - valid token: `Authorization: Bearer <token>` is attached
//! - expired or undecodable token: the session is ended and the request is
//!   never sent
//! - any 401 answer: the session is ended
//!
//! GET responses are cached per query key when a cache is attached.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::api::{
    AdminApi, AirportApi, AuthApi, B2bApi, BaggageApi, MeteoApi, QrApi, SubscriptionApi, UserApi,
    admin, airport, auth, b2b, baggage, meteo, qr, subscription, user,
};
use super::endpoint::Endpoint;
use super::models::{
    ApiDocument, AuthResponse, Baggage, BaggageStation, BatchScanRequest, BatchWeatherRequest,
    CompareQuery, IncidentReport, LogQuery, LoginCredentials, MaintenanceRequest, PathSegment,
    QrGenerateRequest, QrImage, RefreshResponse, RegisterBaggageRequest, RegisterCredentials,
    RegisterRequest, RoleUpdate, ScanRequest, StatisticsQuery, SubscriptionRequest, User,
    WebhookConfig,
};
use crate::cache::{CacheStorage, ClearStats, QueryKey, cache_key};
use crate::config::Config;
use crate::error::{ApiError, ConfigError, Error, Result};
use crate::session::{ActiveSession, SessionContext, SessionEnd, SessionStatus};
use crate::validation::Validate;

/// Who may call an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    /// Login and registration: no session check, 401 means bad credentials
    Public,
    Session,
}

/// Query string parameters
type Params = Vec<(&'static str, String)>;

/// AeroCast API client
pub struct AeroCastClient {
    http: HttpClient,
    base_url: Url,
    session: SessionContext,
    cache: Option<Mutex<CacheStorage>>,
    stale_time: Duration,
}

impl AeroCastClient {
    /// Create a client for the configured API base URL
    pub fn new(config: &Config, session: SessionContext) -> Result<Self> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            ConfigError::Invalid(format!("api_base_url '{}': {}", config.api_base_url, e))
        })?;

        let http = HttpClient::builder()
            .timeout(config.timeout())
            .user_agent(concat!("aerocast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            session,
            cache: None,
            stale_time: config.cache.stale_time(),
        })
    }

    /// Attach a response cache
    pub fn with_cache(mut self, cache: CacheStorage) -> Self {
        self.cache = Some(Mutex::new(cache));
        self
    }

    #[cfg(test)]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Drop every cached response. `None` when no cache is attached.
    pub fn clear_cache(&self) -> Result<Option<ClearStats>> {
        let Some(ref cache) = self.cache else {
            return Ok(None);
        };
        let guard = cache
            .lock()
            .map_err(|_| Error::Other("cache lock poisoned".to_string()))?;
        Ok(Some(guard.clear_all()?))
    }

    /// Request-side hook: decide which credentials, if any, go out
    async fn authorize(&self) -> Result<Option<ActiveSession>> {
        match self.session.store().ensure_session().await {
            SessionStatus::Missing => Ok(None),
            SessionStatus::Valid(active) => Ok(Some(active)),
            SessionStatus::Expired => {
                self.end_session(SessionEnd::Expired).await;
                Err(ApiError::SessionExpired.into())
            }
            SessionStatus::Malformed => {
                self.end_session(SessionEnd::Malformed).await;
                Err(ApiError::InvalidToken.into())
            }
        }
    }

    async fn end_session(&self, reason: SessionEnd) {
        self.session.end_session(reason).await;
        if let Err(e) = self.clear_cache() {
            log::warn!("Failed to clear response cache: {}", e);
        }
    }

    fn request(
        &self,
        method: Method,
        endpoint: &Endpoint,
        session: Option<&ActiveSession>,
    ) -> Result<RequestBuilder> {
        let url = endpoint.url(&self.base_url)?;
        log::debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if let Some(active) = session {
            request = request.bearer_auth(&active.token);
        }
        Ok(request)
    }

    /// Response-side hook: send and map the status code
    async fn dispatch(
        &self,
        request: RequestBuilder,
        endpoint: &Endpoint,
        access: Access,
    ) -> Result<Response> {
        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status();
        log::debug!("{} -> {}", endpoint, status);

        match status {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED if access == Access::Public => {
                Err(ApiError::InvalidCredentials.into())
            }
            StatusCode::UNAUTHORIZED => {
                self.end_session(SessionEnd::Rejected).await;
                Err(ApiError::Unauthorized.into())
            }
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => {
                let error_msg = response
                    .text()
                    .await
                    .ok()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| endpoint.to_string());
                Err(ApiError::NotFound(error_msg).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }

    /// GET through the cache
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        key: QueryKey,
        params: Params,
    ) -> Result<T> {
        self.fetch(endpoint, Some(key), params).await
    }

    /// GET, optionally cached under `key`
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        key: Option<QueryKey>,
        params: Params,
    ) -> Result<T> {
        let session = self.authorize().await?;
        let user_id = session.as_ref().map(|s| s.user.id.as_str());
        let pairs: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();

        let cached = key.as_ref().map(|k| (k, cache_key(k, user_id, &pairs)));
        if let Some((query, ref hash)) = cached
            && let Some(data) = self.get_cached::<T>(hash)
        {
            log::debug!("Cache hit for {}", query);
            return Ok(data);
        }

        let mut request = self.request(Method::GET, &endpoint, session.as_ref())?;
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }
        let response = self.dispatch(request, &endpoint, Access::Session).await?;
        let bytes = response.bytes().await.map_err(ApiError::from)?;
        let data = parse::<T>(&bytes, &endpoint)?;

        if let Some((query, ref hash)) = cached {
            self.set_cached(hash, &bytes, query, user_id);
        }
        Ok(data)
    }

    /// POST/PATCH a JSON body and drop the cached entries of `scope`
    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: Endpoint,
        body: Option<&B>,
        access: Access,
        scope: &str,
    ) -> Result<T> {
        let session = match access {
            Access::Public => None,
            Access::Session => self.authorize().await?,
        };

        let mut request = self.request(method, &endpoint, session.as_ref())?;
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = self.dispatch(request, &endpoint, access).await?;
        let bytes = response.bytes().await.map_err(ApiError::from)?;

        self.invalidate(scope);
        parse::<T>(&bytes, &endpoint)
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: &B,
        scope: &str,
    ) -> Result<T> {
        self.send(Method::POST, endpoint, Some(body), Access::Session, scope)
            .await
    }

    fn get_cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        let guard = cache.lock().ok()?;
        guard
            .get(key)
            .ok()
            .flatten()
            .and_then(|data| serde_json::from_slice(&data).ok())
    }

    fn set_cached(&self, key: &str, data: &[u8], query: &QueryKey, user_id: Option<&str>) {
        if let Some(ref cache) = self.cache
            && let Ok(guard) = cache.lock()
            && let Err(e) = guard.put(key, data, query, user_id, self.stale_time)
        {
            log::warn!("Failed to cache {}: {}", query, e);
        }
    }

    fn invalidate(&self, scope: &str) {
        if let Some(ref cache) = self.cache
            && let Ok(guard) = cache.lock()
        {
            match guard.delete_by_scope(scope) {
                Ok(0) => {}
                Ok(n) => log::debug!("Invalidated {} cached {} entries", n, scope),
                Err(e) => log::warn!("Failed to invalidate {} cache: {}", scope, e),
            }
        }
    }
}

fn parse<T: DeserializeOwned>(bytes: &[u8], endpoint: &Endpoint) -> Result<T> {
    // empty bodies read as JSON null so `()` and `Option` responses work
    let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };
    serde_json::from_slice(bytes).map_err(|e| {
        ApiError::InvalidResponse(format!("Failed to parse {} response: {}", endpoint, e)).into()
    })
}

fn segment(field: &'static str, value: &str) -> Result<PathSegment> {
    Ok(PathSegment::parse(field, value)?)
}

#[async_trait]
impl AuthApi for AeroCastClient {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        credentials.validate()?;
        let endpoint = Endpoint::new("auth").path("connexion");
        self.send(
            Method::POST,
            endpoint,
            Some(credentials),
            Access::Public,
            auth::keys::SCOPE,
        )
        .await
    }

    async fn register(&self, credentials: &RegisterCredentials) -> Result<AuthResponse> {
        credentials.validate()?;
        let endpoint = Endpoint::new("auth").path("inscription");
        let body = RegisterRequest::from(credentials);
        self.send(
            Method::POST,
            endpoint,
            Some(&body),
            Access::Public,
            auth::keys::SCOPE,
        )
        .await
    }

    async fn refresh(&self) -> Result<RefreshResponse> {
        let endpoint = Endpoint::new("auth").path("rafraichir");
        self.send::<(), _>(Method::POST, endpoint, None, Access::Session, auth::keys::SCOPE)
            .await
    }

    async fn profile(&self) -> Result<User> {
        let endpoint = Endpoint::new("auth").path("profil");
        self.get(endpoint, auth::keys::profile(), vec![]).await
    }

    async fn sign_out(&self) -> Result<()> {
        let endpoint = Endpoint::new("auth").path("deconnexion");
        let _: Option<serde_json::Value> = self
            .send::<(), _>(Method::POST, endpoint, None, Access::Session, auth::keys::SCOPE)
            .await?;
        Ok(())
    }

    async fn check_session(&self) -> Result<bool> {
        if self.session.store().stored_token().is_none() {
            return Ok(false);
        }

        let endpoint = Endpoint::new("auth").path("profil");
        match self.fetch::<User>(endpoint, None, vec![]).await {
            Ok(_) => Ok(true),
            Err(Error::Api(
                ApiError::Unauthorized | ApiError::SessionExpired | ApiError::InvalidToken,
            )) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl BaggageApi for AeroCastClient {
    async fn register_baggage(&self, request: &RegisterBaggageRequest) -> Result<Baggage> {
        request.validate()?;
        let endpoint = Endpoint::new("bagages").path("enregistrer");
        self.post(endpoint, request, baggage::keys::SCOPE).await
    }

    async fn get_baggage(&self, id: &str) -> Result<Baggage> {
        let id = segment("id_bagage", id)?;
        let endpoint = Endpoint::new("bagages").param(&id);
        self.get(endpoint, baggage::keys::detail(id.as_str()), vec![])
            .await
    }

    async fn baggage_by_qr(&self, code: &str) -> Result<Baggage> {
        let code = segment("code_qr", code)?;
        let endpoint = Endpoint::new("bagages").path("qr").param(&code);
        self.get(endpoint, baggage::keys::by_qr(code.as_str()), vec![])
            .await
    }

    async fn flight_baggage(&self, flight_number: &str) -> Result<Vec<Baggage>> {
        let flight = segment("numero_vol", flight_number)?;
        let endpoint = Endpoint::new("bagages").path("vol").param(&flight);
        self.get(endpoint, baggage::keys::by_flight(flight.as_str()), vec![])
            .await
    }

    async fn scan_baggage(&self, request: &ScanRequest) -> Result<ApiDocument> {
        request.validate()?;
        let endpoint = Endpoint::new("bagages").path("scanner");
        self.post(endpoint, request, baggage::keys::SCOPE).await
    }

    async fn baggage_history(&self, id: &str) -> Result<Vec<BaggageStation>> {
        let id = segment("id_bagage", id)?;
        let endpoint = Endpoint::new("bagages").param(&id).path("historique");
        self.get(endpoint, baggage::keys::history(id.as_str()), vec![])
            .await
    }

    async fn report_incident(&self, id: &str, report: &IncidentReport) -> Result<ApiDocument> {
        let id = segment("id_bagage", id)?;
        report.validate()?;
        let endpoint = Endpoint::new("bagages").param(&id).path("incident");
        self.post(endpoint, report, baggage::keys::SCOPE).await
    }

    async fn flight_statistics(&self, flight_number: &str) -> Result<ApiDocument> {
        let flight = segment("numero_vol", flight_number)?;
        let endpoint = Endpoint::new("bagages")
            .path("statistiques")
            .path("vol")
            .param(&flight);
        self.get(endpoint, baggage::keys::statistics(flight.as_str()), vec![])
            .await
    }
}

#[async_trait]
impl MeteoApi for AeroCastClient {
    async fn predictions(&self, airport: &str) -> Result<ApiDocument> {
        let code = segment("code_aeroport", airport)?;
        let endpoint = Endpoint::new("meteo").path("predictions").param(&code);
        self.get(endpoint, meteo::keys::predictions(code.as_str()), vec![])
            .await
    }

    async fn runway_predictions(&self, airport: &str, runway: &str) -> Result<ApiDocument> {
        let code = segment("code_aeroport", airport)?;
        let runway = segment("id_piste", runway)?;
        let endpoint = Endpoint::new("meteo")
            .path("predictions")
            .param(&code)
            .path("piste")
            .param(&runway);
        let key = meteo::keys::runway_predictions(code.as_str(), runway.as_str());
        self.get(endpoint, key, vec![]).await
    }

    async fn alerts(&self, airport: &str) -> Result<ApiDocument> {
        let code = segment("code_aeroport", airport)?;
        let endpoint = Endpoint::new("meteo").path("alertes").param(&code);
        self.get(endpoint, meteo::keys::alerts(code.as_str()), vec![])
            .await
    }

    async fn compare(&self, query: &CompareQuery) -> Result<ApiDocument> {
        query.validate()?;
        let endpoint = Endpoint::new("meteo").path("comparer");
        self.get(endpoint, meteo::keys::compare(), query.pairs())
            .await
    }

    async fn trigger_update(&self) -> Result<ApiDocument> {
        let endpoint = Endpoint::new("meteo").path("declencher-mise-a-jour");
        self.send::<(), _>(Method::POST, endpoint, None, Access::Session, meteo::keys::SCOPE)
            .await
    }

    async fn update_status(&self) -> Result<ApiDocument> {
        let endpoint = Endpoint::new("meteo").path("statut");
        self.get(endpoint, meteo::keys::status(), vec![]).await
    }
}

#[async_trait]
impl AirportApi for AeroCastClient {
    async fn list_airports(&self) -> Result<ApiDocument> {
        let endpoint = Endpoint::new("aeroports").trailing_slash();
        self.get(endpoint, airport::keys::list(), vec![]).await
    }

    async fn get_airport(&self, code: &str) -> Result<ApiDocument> {
        let code = segment("code_aeroport", code)?;
        let endpoint = Endpoint::new("aeroports").param(&code);
        self.get(endpoint, airport::keys::detail(code.as_str()), vec![])
            .await
    }

    async fn runways(&self, code: &str) -> Result<ApiDocument> {
        let code = segment("code_aeroport", code)?;
        let endpoint = Endpoint::new("aeroports").param(&code).path("pistes");
        self.get(endpoint, airport::keys::runways(code.as_str()), vec![])
            .await
    }
}

#[async_trait]
impl AdminApi for AeroCastClient {
    async fn statistics(&self, query: &StatisticsQuery) -> Result<ApiDocument> {
        query.validate()?;
        let endpoint = Endpoint::new("admin").path("statistiques");
        self.get(endpoint, admin::keys::statistics(), query.pairs())
            .await
    }

    async fn logs(&self, query: &LogQuery) -> Result<ApiDocument> {
        query.validate()?;
        let endpoint = Endpoint::new("admin").path("logs");
        self.get(endpoint, admin::keys::logs(), query.pairs()).await
    }

    async fn health(&self) -> Result<ApiDocument> {
        let endpoint = Endpoint::new("admin").path("sante");
        self.get(endpoint, admin::keys::health(), vec![]).await
    }

    async fn maintenance(&self, request: &MaintenanceRequest) -> Result<ApiDocument> {
        request.validate()?;
        let endpoint = Endpoint::new("admin").path("maintenance");
        self.post(endpoint, request, admin::keys::SCOPE).await
    }
}

#[async_trait]
impl SubscriptionApi for AeroCastClient {
    async fn plans(&self) -> Result<ApiDocument> {
        let endpoint = Endpoint::new("abonnements").path("forfaits");
        self.get(endpoint, subscription::keys::plans(), vec![]).await
    }

    async fn subscribe(&self, request: &SubscriptionRequest) -> Result<ApiDocument> {
        request.validate()?;
        let endpoint = Endpoint::new("abonnements").path("souscrire");
        self.post(endpoint, request, subscription::keys::SCOPE)
            .await
    }

    async fn usage(&self, company_id: &str) -> Result<ApiDocument> {
        let id = segment("id_compagnie", company_id)?;
        let endpoint = Endpoint::new("abonnements").param(&id).path("utilisation");
        self.get(endpoint, subscription::keys::usage(id.as_str()), vec![])
            .await
    }

    async fn billing(&self, company_id: &str) -> Result<ApiDocument> {
        let id = segment("id_compagnie", company_id)?;
        let endpoint = Endpoint::new("abonnements").param(&id).path("facturation");
        self.get(endpoint, subscription::keys::billing(id.as_str()), vec![])
            .await
    }
}

#[async_trait]
impl B2bApi for AeroCastClient {
    async fn batch_weather(&self, request: &BatchWeatherRequest) -> Result<ApiDocument> {
        request.validate()?;
        let endpoint = Endpoint::new("b2b").path("meteo").path("lot");
        self.post(endpoint, request, b2b::keys::SCOPE).await
    }

    async fn batch_scan(&self, request: &BatchScanRequest) -> Result<ApiDocument> {
        request.validate()?;
        let endpoint = Endpoint::new("b2b").path("bagages").path("scanner-lot");
        let document = self.post(endpoint, request, b2b::keys::SCOPE).await?;
        // batch scans move bags too
        self.invalidate(baggage::keys::SCOPE);
        Ok(document)
    }

    async fn documentation(&self) -> Result<ApiDocument> {
        let endpoint = Endpoint::new("b2b").path("documentation");
        self.get(endpoint, b2b::keys::documentation(), vec![]).await
    }

    async fn configure_webhook(&self, config: &WebhookConfig) -> Result<ApiDocument> {
        config.validate()?;
        let endpoint = Endpoint::new("b2b").path("webhook").path("configurer");
        self.post(endpoint, config, b2b::keys::SCOPE).await
    }
}

#[async_trait]
impl QrApi for AeroCastClient {
    async fn generate_qr(&self, request: &QrGenerateRequest) -> Result<ApiDocument> {
        request.validate()?;
        let endpoint = Endpoint::new("qr").path("generer");
        self.post(endpoint, request, qr::keys::SCOPE).await
    }

    async fn validate_qr(&self, code: &str) -> Result<ApiDocument> {
        let code = segment("code_qr", code)?;
        let endpoint = Endpoint::new("qr").path("valider").param(&code);
        self.get(endpoint, qr::keys::validate(code.as_str()), vec![])
            .await
    }

    async fn download_qr(&self, code: &str) -> Result<QrImage> {
        let code = segment("code_qr", code)?;
        let endpoint = Endpoint::new("qr").path("telecharger").param(&code);

        let session = self.authorize().await?;
        let request = self.request(Method::GET, &endpoint, session.as_ref())?;
        let response = self.dispatch(request, &endpoint, Access::Session).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(ApiError::from)?;

        Ok(QrImage {
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}

#[async_trait]
impl UserApi for AeroCastClient {
    async fn permissions(&self, user_id: &str) -> Result<ApiDocument> {
        let id = segment("id_utilisateur", user_id)?;
        let endpoint = Endpoint::new("utilisateurs").param(&id).path("permissions");
        self.get(endpoint, user::keys::permissions(id.as_str()), vec![])
            .await
    }

    async fn update_role(&self, user_id: &str, update: &RoleUpdate) -> Result<ApiDocument> {
        let id = segment("id_utilisateur", user_id)?;
        update.validate()?;
        let endpoint = Endpoint::new("utilisateurs").param(&id).path("role");
        self.send(
            Method::PATCH,
            endpoint,
            Some(update),
            Access::Session,
            user::keys::SCOPE,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration as ChronoDuration, Utc};
    use mockito::{Matcher, Server};
    use tempfile::TempDir;

    use super::*;
    use crate::session::SessionStore;
    use crate::session::notice::Recorder;
    use crate::session::token::{TokenPayload, encode};

    fn user() -> User {
        User {
            id: "1".into(),
            name: "John Doe".into(),
            email: "admin@aerocast.com".into(),
            role: Some("user".into()),
            numero_passport: None,
        }
    }

    fn client_for(url: &str, recorder: &Recorder) -> AeroCastClient {
        let config = Config {
            api_base_url: url.to_string(),
            ..Config::default()
        };
        let session = SessionContext::new(
            SessionStore::in_memory(),
            Arc::new(recorder.clone()),
            Arc::new(recorder.clone()),
        );
        AeroCastClient::new(&config, session).unwrap()
    }

    async fn sign_in(client: &AeroCastClient) -> String {
        let token = encode(&TokenPayload::issue("1", "admin@aerocast.com", Utc::now()));
        client
            .session()
            .store()
            .set_auth(token.clone(), user())
            .await
            .unwrap();
        token
    }

    async fn sign_in_expired(client: &AeroCastClient) {
        let issued = Utc::now() - ChronoDuration::days(2);
        let token = encode(&TokenPayload::issue("1", "admin@aerocast.com", issued));
        client.session().store().set_auth(token, user()).await.unwrap();
    }

    #[test]
    fn test_client_creation() {
        let recorder = Recorder::new();
        let client = client_for("http://localhost:3000", &recorder);
        assert_eq!(client.base_url().as_str(), "http://localhost:3000/");
    }

    #[test]
    fn test_client_rejects_bad_base_url() {
        let config = Config {
            api_base_url: "not a url".to_string(),
            ..Config::default()
        };
        let session = SessionContext::new(
            SessionStore::in_memory(),
            Arc::new(Recorder::new()),
            Arc::new(Recorder::new()),
        );
        assert!(AeroCastClient::new(&config, session).is_err());
    }

    #[test]
    fn test_parse_empty_body_as_null() {
        let endpoint = Endpoint::new("auth").path("deconnexion");
        let parsed: Option<serde_json::Value> = parse(b"", &endpoint).unwrap();
        assert!(parsed.is_none());
        assert!(parse::<User>(b"{", &endpoint).is_err());
    }

    #[tokio::test]
    async fn test_expired_token_never_reaches_the_network() {
        let recorder = Recorder::new();
        // nothing listens here; a sent request would fail with Network
        let client = client_for("http://127.0.0.1:9", &recorder);
        sign_in_expired(&client).await;

        let err = client.profile().await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::SessionExpired)));

        assert!(client.session().store().stored_token().is_none());
        assert_eq!(recorder.locations(), vec!["/login?expired=true".to_string()]);
        assert_eq!(recorder.notices()[0].title, "Your session has expired");
    }

    #[tokio::test]
    async fn test_malformed_token_is_rejected_before_send() {
        let recorder = Recorder::new();
        let client = client_for("http://127.0.0.1:9", &recorder);
        client
            .session()
            .store()
            .set_auth("not-a-token".into(), user())
            .await
            .unwrap();

        let err = client.alerts("CDG").await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::InvalidToken)));
        assert!(!client.session().store().check_auth().await);
        assert_eq!(recorder.locations(), vec!["/login?expired=true".to_string()]);
    }

    #[tokio::test]
    async fn test_path_params_are_validated() {
        let recorder = Recorder::new();
        let client = client_for("http://127.0.0.1:9", &recorder);

        let err = client.get_baggage("  ").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        // dot segments would be collapsed into another endpoint by the URL parser
        let err = client.get_baggage(".").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        let err = client.baggage_history("..").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(recorder.locations().is_empty());
    }

    #[tokio::test]
    async fn test_check_session_without_token() {
        let recorder = Recorder::new();
        let client = client_for("http://127.0.0.1:9", &recorder);
        assert!(!client.check_session().await.unwrap());
        assert!(recorder.notices().is_empty());
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_bearer_token_attached() {
        let mut server = Server::new_async().await;
        let recorder = Recorder::new();
        let client = client_for(&server.url(), &recorder);
        let token = sign_in(&client).await;

        let mock = server
            .mock("GET", "/api/v1/auth/profil")
            .match_header("authorization", format!("Bearer {}", token).as_str())
            .with_status(200)
            .with_body(r#"{"id":"1","name":"John Doe","email":"admin@aerocast.com"}"#)
            .create_async()
            .await;

        let profile = client.profile().await.unwrap();
        assert_eq!(profile.name, "John Doe");
        mock.assert_async().await;
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_no_token_sends_without_credentials() {
        let mut server = Server::new_async().await;
        let recorder = Recorder::new();
        let client = client_for(&server.url(), &recorder);

        let mock = server
            .mock("GET", "/api/v1/aeroports/")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(r#"[{"code":"CDG"}]"#)
            .create_async()
            .await;

        let airports = client.list_airports().await.unwrap();
        assert_eq!(airports.len(), Some(1));
        mock.assert_async().await;
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_401_ends_session() {
        let mut server = Server::new_async().await;
        let recorder = Recorder::new();
        let client = client_for(&server.url(), &recorder);
        sign_in(&client).await;

        let _mock = server
            .mock("GET", "/api/v1/bagages/42")
            .with_status(401)
            .create_async()
            .await;

        let err = client.get_baggage("42").await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Unauthorized)));

        assert!(client.session().store().stored_token().is_none());
        assert!(!client.session().store().snapshot().await.is_authenticated);
        assert_eq!(recorder.notices()[0].title, "Session expired");
        assert_eq!(recorder.locations(), vec!["/login?expired=true".to_string()]);
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_login_401_is_invalid_credentials() {
        let mut server = Server::new_async().await;
        let recorder = Recorder::new();
        let client = client_for(&server.url(), &recorder);

        let _mock = server
            .mock("POST", "/api/v1/auth/connexion")
            .with_status(401)
            .create_async()
            .await;

        let creds = LoginCredentials {
            email: "admin@aerocast.com".into(),
            password: "wrongpassword".into(),
        };
        let err = client.login(&creds).await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::InvalidCredentials)));
        assert!(recorder.locations().is_empty());
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_status_mapping() {
        let mut server = Server::new_async().await;
        let recorder = Recorder::new();
        let client = client_for(&server.url(), &recorder);
        sign_in(&client).await;

        let _forbidden = server
            .mock("GET", "/api/v1/admin/sante")
            .with_status(403)
            .create_async()
            .await;
        let _missing = server
            .mock("GET", "/api/v1/aeroports/XXX")
            .with_status(404)
            .with_body("Aéroport introuvable")
            .create_async()
            .await;
        let _invalid = server
            .mock("POST", "/api/v1/qr/generer")
            .with_status(422)
            .with_body("id_bagage inconnu")
            .create_async()
            .await;
        let _down = server
            .mock("GET", "/api/v1/meteo/statut")
            .with_status(503)
            .create_async()
            .await;

        assert!(matches!(
            client.health().await.unwrap_err(),
            Error::Api(ApiError::Forbidden)
        ));
        match client.get_airport("XXX").await.unwrap_err() {
            Error::Api(ApiError::NotFound(msg)) => assert_eq!(msg, "Aéroport introuvable"),
            other => panic!("unexpected {:?}", other),
        }
        let request = QrGenerateRequest {
            id_bagage: "999".into(),
        };
        assert!(matches!(
            client.generate_qr(&request).await.unwrap_err(),
            Error::Api(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            client.update_status().await.unwrap_err(),
            Error::Api(ApiError::ServerError(_))
        ));

        // none of these end the session
        assert!(client.session().store().check_auth().await);
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_query_params_sent() {
        let mut server = Server::new_async().await;
        let recorder = Recorder::new();
        let client = client_for(&server.url(), &recorder);
        sign_in(&client).await;

        let mock = server
            .mock("GET", "/api/v1/meteo/comparer")
            .match_query(Matcher::UrlEncoded("aeroports".into(), "CDG,NCE".into()))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let query = CompareQuery {
            aeroports: vec!["CDG".into(), "NCE".into()],
            horizon: None,
        };
        client.compare(&query).await.unwrap();
        mock.assert_async().await;
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_gets_cached_until_mutation() {
        let mut server = Server::new_async().await;
        let recorder = Recorder::new();
        let dir = TempDir::new().unwrap();
        let client = client_for(&server.url(), &recorder)
            .with_cache(CacheStorage::open_at(dir.path()).unwrap());
        sign_in(&client).await;

        let body = r#"{"id":"42","code":"BAG-42","qrCode":"BAG-42","owner":"John Doe",
            "flightNumber":"AF123","status":"pending","route":[]}"#;
        let detail = server
            .mock("GET", "/api/v1/bagages/42")
            .with_status(200)
            .with_body(body)
            .expect(2)
            .create_async()
            .await;
        let _scan = server
            .mock("POST", "/api/v1/bagages/scanner")
            .with_status(200)
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        client.get_baggage("42").await.unwrap();
        client.get_baggage("42").await.unwrap();

        let scan = ScanRequest {
            qr_code: "BAG-42".into(),
            station: "Security".into(),
            location: None,
        };
        client.scan_baggage(&scan).await.unwrap();
        client.get_baggage("42").await.unwrap();

        detail.assert_async().await;
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_download_qr_bytes() {
        let mut server = Server::new_async().await;
        let recorder = Recorder::new();
        let client = client_for(&server.url(), &recorder);
        sign_in(&client).await;

        let _mock = server
            .mock("GET", "/api/v1/qr/telecharger/BAG-1")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(vec![0x89, b'P', b'N', b'G'])
            .create_async()
            .await;

        let image = client.download_qr("BAG-1").await.unwrap();
        assert_eq!(image.extension(), "png");
        assert_eq!(image.bytes, vec![0x89, b'P', b'N', b'G']);
    }
}

//! gRPC infrastructure: implements the catalog transport ports over tonic.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::SystemTime;

use catalog_common::{
    AddApplicationRequest, ApplicationList, ApplicationsClient, CatalogClient,
    DeployApplicationRequest, DownloadApplicationRequest, EmptyRequest, FileInfo,
    InfoApplicationRequest, InfoApplicationResponse, ListApplicationsRequest, OpResponse,
    RemoveApplicationRequest, SummaryResponse, UpdateRequest,
};
use hyper::Uri;
use hyper::client::HttpConnector;
use hyper::http::uri::{PathAndQuery, Scheme};
use hyper::service::Service;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder, MaybeHttpsStream};
use rustls::client::{ServerCertVerified, ServerCertVerifier};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tokio_stream::wrappers::ReceiverStream;
use tonic::codec::Streaming;
use tonic::metadata::AsciiMetadataValue;
use tonic::service::Interceptor;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};
use tonic::{Code, Status};
use tracing::{debug, warn};

use crate::application::ports::{CatalogConnector, CatalogSession, DownloadStream, UploadStream};
use crate::domain::config::AuthToken;
use crate::domain::{CatalogError, ConnectionTarget};

type AuthedChannel = InterceptedService<Channel, MetadataInterceptor>;

/// Adds the agent, version and authorization metadata to every call.
#[derive(Debug, Clone)]
pub struct MetadataInterceptor {
    headers: Vec<(&'static str, AsciiMetadataValue)>,
}

impl MetadataInterceptor {
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidArgument` if a value cannot be carried
    /// in a header.
    pub fn new(auth: &AuthToken) -> Result<Self, CatalogError> {
        let headers = auth
            .headers()
            .into_iter()
            .map(|(key, value)| {
                value.parse::<AsciiMetadataValue>().map(|v| (key, v)).map_err(|_| {
                    CatalogError::InvalidArgument(format!(
                        "{key} contains characters that cannot be sent as metadata"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { headers })
    }
}

impl Interceptor for MetadataInterceptor {
    fn call(&mut self, mut request: tonic::Request<()>) -> Result<tonic::Request<()>, Status> {
        for (key, value) in &self.headers {
            request.metadata_mut().insert(*key, value.clone());
        }
        Ok(request)
    }
}

/// Map a failed call to the error taxonomy.
#[must_use]
pub fn status_error(address: &str, status: &Status) -> CatalogError {
    let message = if status.message().is_empty() {
        status.code().description().to_string()
    } else {
        status.message().to_string()
    };
    match status.code() {
        Code::Unavailable => CatalogError::Connection {
            address: address.to_string(),
            message,
        },
        _ if is_transport_failure(status) => CatalogError::Connection {
            address: address.to_string(),
            message,
        },
        code => CatalogError::Remote {
            code: format!("{code:?}"),
            message,
        },
    }
}

/// Whether the call failed below gRPC, e.g. while dialing.
fn is_transport_failure(status: &Status) -> bool {
    let mut source = std::error::Error::source(status);
    while let Some(err) = source {
        if err.is::<tonic::transport::Error>() {
            return true;
        }
        source = err.source();
    }
    false
}

/// Production implementation of `CatalogConnector`.
pub struct GrpcConnector {
    interceptor: MetadataInterceptor,
}

impl GrpcConnector {
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidArgument` if the credentials cannot be
    /// sent as metadata.
    pub fn new(auth: &AuthToken) -> Result<Self, CatalogError> {
        Ok(Self {
            interceptor: MetadataInterceptor::new(auth)?,
        })
    }
}

impl CatalogConnector for GrpcConnector {
    type Session = GrpcSession;

    fn connect(&self, target: &ConnectionTarget) -> Result<GrpcSession, CatalogError> {
        let channel = channel(target)?;
        let service = InterceptedService::new(channel, self.interceptor.clone());
        debug!(address = %target.address, tls = target.use_tls, "catalog session prepared");
        Ok(GrpcSession {
            address: target.address.clone(),
            catalog: CatalogClient::new(service.clone()),
            applications: ApplicationsClient::new(service),
        })
    }
}

/// How the channel to the catalog-manager is secured.
#[derive(Debug)]
enum Transport {
    Plain,
    Verified(ClientTlsConfig),
    /// TLS without verifying the server certificate chain or name.
    AcceptAnyCertificate,
}

fn transport(target: &ConnectionTarget) -> Result<Transport, CatalogError> {
    if !target.use_tls {
        return Ok(Transport::Plain);
    }
    if target.skip_cert_validation {
        return Ok(Transport::AcceptAnyCertificate);
    }
    let mut tls = ClientTlsConfig::new().domain_name(target.host());
    if let Some(ca) = &target.client_ca {
        let pem = std::fs::read(ca)
            .map_err(|e| CatalogError::io(format!("cannot read CA {}", ca.display()), e))?;
        tls = tls.ca_certificate(Certificate::from_pem(pem));
    }
    Ok(Transport::Verified(tls))
}

fn endpoint(target: &ConnectionTarget, scheme: &str) -> Result<Endpoint, CatalogError> {
    Endpoint::from_shared(format!("{scheme}://{}", target.address)).map_err(|e| {
        CatalogError::InvalidArgument(format!("invalid catalog address {}: {e}", target.address))
    })
}

/// Build a lazily connecting channel for `target`.
fn channel(target: &ConnectionTarget) -> Result<Channel, CatalogError> {
    match transport(target)? {
        Transport::Plain => Ok(endpoint(target, "http")?.connect_lazy()),
        Transport::Verified(tls) => endpoint(target, "https")?
            .tls_config(tls)
            .map(|endpoint| endpoint.connect_lazy())
            .map_err(|e| CatalogError::Connection {
                address: target.address.clone(),
                message: e.to_string(),
            }),
        Transport::AcceptAnyCertificate => {
            warn!(address = %target.address, "server certificate will not be verified");
            // tonic refuses https URIs without its own TLS config; the connector
            // upgrades the plain URI instead.
            Ok(endpoint(target, "http")?.connect_with_connector_lazy(UnverifiedTls::new()))
        }
    }
}

/// Connector that always dials TLS and accepts any server certificate.
#[derive(Clone)]
struct UnverifiedTls {
    inner: HttpsConnector<HttpConnector>,
}

impl UnverifiedTls {
    fn new() -> Self {
        let config = rustls::ClientConfig::builder()
            .with_safe_defaults()
            .with_custom_certificate_verifier(Arc::new(AnyServerCertificate))
            .with_no_client_auth();
        Self {
            inner: HttpsConnectorBuilder::new()
                .with_tls_config(config)
                .https_only()
                .enable_http2()
                .build(),
        }
    }
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

impl Service<Uri> for UnverifiedTls {
    type Response = MaybeHttpsStream<TcpStream>;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, BoxError>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), BoxError>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, uri: Uri) -> Self::Future {
        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(with_https_scheme(uri)?).await })
    }
}

fn with_https_scheme(uri: Uri) -> Result<Uri, BoxError> {
    let mut parts = uri.into_parts();
    parts.scheme = Some(Scheme::HTTPS);
    if parts.path_and_query.is_none() {
        parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    Ok(Uri::from_parts(parts)?)
}

/// Certificate verifier used when validation is switched off.
struct AnyServerCertificate;

impl ServerCertVerifier for AnyServerCertificate {
    fn verify_server_cert(
        &self,
        _end_entity: &rustls::Certificate,
        _intermediates: &[rustls::Certificate],
        _server_name: &rustls::ServerName,
        _scts: &mut dyn Iterator<Item = &[u8]>,
        _ocsp_response: &[u8],
        _now: SystemTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }
}

/// A prepared session with one catalog-manager.
pub struct GrpcSession {
    address: String,
    catalog: CatalogClient<AuthedChannel>,
    applications: ApplicationsClient<AuthedChannel>,
}

impl GrpcSession {
    fn fail(&self, status: &Status) -> CatalogError {
        status_error(&self.address, status)
    }
}

impl CatalogSession for GrpcSession {
    type Upload = GrpcUpload;
    type Download = GrpcDownload;

    async fn open_upload(&self) -> Result<GrpcUpload, CatalogError> {
        // Capacity 1 keeps at most one pending file in memory.
        let (sender, receiver) = mpsc::channel(1);
        let mut client = self.catalog.clone();
        let call = tokio::spawn(async move {
            client
                .add(ReceiverStream::new(receiver))
                .await
                .map(tonic::Response::into_inner)
        });
        Ok(GrpcUpload {
            address: self.address.clone(),
            sender: Some(sender),
            call: Some(call),
        })
    }

    async fn open_download(
        &self,
        request: DownloadApplicationRequest,
    ) -> Result<GrpcDownload, CatalogError> {
        let mut client = self.catalog.clone();
        let stream = client
            .download(request)
            .await
            .map_err(|s| self.fail(&s))?
            .into_inner();
        Ok(GrpcDownload {
            address: self.address.clone(),
            stream,
        })
    }

    async fn remove(&self, request: RemoveApplicationRequest) -> Result<OpResponse, CatalogError> {
        let mut client = self.catalog.clone();
        client
            .remove(request)
            .await
            .map(tonic::Response::into_inner)
            .map_err(|s| self.fail(&s))
    }

    async fn info(
        &self,
        request: InfoApplicationRequest,
    ) -> Result<InfoApplicationResponse, CatalogError> {
        let mut client = self.catalog.clone();
        client
            .info(request)
            .await
            .map(tonic::Response::into_inner)
            .map_err(|s| self.fail(&s))
    }

    async fn list(&self, request: ListApplicationsRequest) -> Result<ApplicationList, CatalogError> {
        let mut client = self.catalog.clone();
        client
            .list(request)
            .await
            .map(tonic::Response::into_inner)
            .map_err(|s| self.fail(&s))
    }

    async fn update(&self, request: UpdateRequest) -> Result<OpResponse, CatalogError> {
        let mut client = self.catalog.clone();
        client
            .update(request)
            .await
            .map(tonic::Response::into_inner)
            .map_err(|s| self.fail(&s))
    }

    async fn summary(&self) -> Result<SummaryResponse, CatalogError> {
        let mut client = self.catalog.clone();
        client
            .summary(EmptyRequest {})
            .await
            .map(tonic::Response::into_inner)
            .map_err(|s| self.fail(&s))
    }

    async fn deploy(&self, request: DeployApplicationRequest) -> Result<OpResponse, CatalogError> {
        let mut client = self.applications.clone();
        client
            .deploy(request)
            .await
            .map(tonic::Response::into_inner)
            .map_err(|s| self.fail(&s))
    }
}

/// Client side of an in-flight Add call.
///
/// The call runs on its own task, fed through a bounded channel.
pub struct GrpcUpload {
    address: String,
    sender: Option<mpsc::Sender<AddApplicationRequest>>,
    call: Option<JoinHandle<Result<OpResponse, Status>>>,
}

impl GrpcUpload {
    async fn outcome(&mut self) -> Result<OpResponse, CatalogError> {
        let Some(call) = self.call.take() else {
            return Err(CatalogError::remote("upload stream already finished"));
        };
        self.joined(call.await)
    }

    fn joined(
        &self,
        joined: Result<Result<OpResponse, Status>, JoinError>,
    ) -> Result<OpResponse, CatalogError> {
        match joined {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(status)) => Err(status_error(&self.address, &status)),
            Err(e) => Err(CatalogError::remote(format!("upload task failed: {e}"))),
        }
    }
}

impl UploadStream for GrpcUpload {
    async fn send(&mut self, message: AddApplicationRequest) -> Result<(), CatalogError> {
        let (Some(sender), Some(call)) = (self.sender.as_ref(), self.call.as_mut()) else {
            return Err(CatalogError::remote("upload stream already closed"));
        };
        // The server may end the call while the request stream is still open.
        let ended = tokio::select! {
            sent = sender.send(message) => match sent {
                Ok(()) => return Ok(()),
                Err(_) => None,
            },
            joined = call => Some(joined),
        };
        self.sender = None;
        let response = match ended {
            Some(joined) => {
                self.call = None;
                self.joined(joined)?
            }
            None => self.outcome().await?,
        };
        Err(CatalogError::remote(format!(
            "catalog closed the upload early: {}",
            response.user_info
        )))
    }

    async fn close_and_recv(mut self) -> Result<OpResponse, CatalogError> {
        self.sender = None;
        self.outcome().await
    }
}

impl Drop for GrpcUpload {
    fn drop(&mut self) {
        if let Some(call) = self.call.take() {
            call.abort();
        }
    }
}

/// Client side of an in-flight Download call.
pub struct GrpcDownload {
    address: String,
    stream: Streaming<FileInfo>,
}

impl DownloadStream for GrpcDownload {
    async fn recv(&mut self) -> Result<Option<FileInfo>, CatalogError> {
        self.stream
            .message()
            .await
            .map_err(|s| status_error(&self.address, &s))
    }
}

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};
use tokio::time::Instant;
use tracing::debug;

use crate::args::{Network, QueryType};
use crate::error::ProbeError;

use super::resolver::{Exchange, ProbeQuery, Resolver};

/// Large enough for EDNS-sized answers; plain DNS caps UDP payloads at 512.
const UDP_BUFFER_SIZE: usize = 4096;
const TCP_LENGTH_PREFIX: usize = 2;

/// Resolver speaking the DNS wire protocol over UDP or TCP.
///
/// Timeouts are applied by the caller.
#[derive(Debug, Clone, Copy)]
pub struct DnsResolver {
    network: Network,
}

impl DnsResolver {
    #[must_use]
    pub const fn new(network: Network) -> Self {
        Self { network }
    }
}

#[async_trait]
impl Resolver for DnsResolver {
    async fn exchange(
        &self,
        query: &ProbeQuery,
        server: SocketAddr,
    ) -> Result<Exchange, ProbeError> {
        let request = build_request(query)?;
        let payload = request
            .to_vec()
            .map_err(|err| ProbeError::Encode { source: err })?;
        let id = request.id();

        let (response, rtt) = match self.network {
            Network::Udp => exchange_udp(server, &payload, id).await?,
            Network::Tcp => exchange_tcp(server, &payload, id).await?,
        };

        Ok(Exchange {
            answers: response.answers().len(),
            rtt,
        })
    }
}

pub(crate) fn build_request(query: &ProbeQuery) -> Result<Message, ProbeError> {
    let name = Name::from_ascii(&query.name).map_err(|err| ProbeError::InvalidName {
        name: query.name.clone(),
        source: err,
    })?;
    let mut message = Message::new();
    message
        .set_id(rand::random::<u16>())
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .add_query(Query::query(name, record_type(query.record_type)));
    Ok(message)
}

pub(crate) const fn record_type(query_type: QueryType) -> RecordType {
    match query_type {
        QueryType::A => RecordType::A,
        QueryType::Aaaa => RecordType::AAAA,
        QueryType::Cname => RecordType::CNAME,
        QueryType::Mx => RecordType::MX,
        QueryType::Ns => RecordType::NS,
        QueryType::Ptr => RecordType::PTR,
        QueryType::Soa => RecordType::SOA,
        QueryType::Srv => RecordType::SRV,
        QueryType::Txt => RecordType::TXT,
    }
}

async fn exchange_udp(
    server: SocketAddr,
    payload: &[u8],
    id: u16,
) -> Result<(Message, std::time::Duration), ProbeError> {
    let bind_addr: SocketAddr = if server.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };
    let socket = UdpSocket::bind(bind_addr)
        .await
        .map_err(|err| io_error("bind udp socket", err))?;
    socket
        .connect(server)
        .await
        .map_err(|err| io_error("connect udp socket", err))?;

    let start = Instant::now();
    socket
        .send(payload)
        .await
        .map_err(|err| io_error("send query", err))?;

    let mut buffer = vec![0_u8; UDP_BUFFER_SIZE];
    loop {
        let len = socket
            .recv(&mut buffer)
            .await
            .map_err(|err| io_error("read response", err))?;
        let datagram = buffer.get(..len).unwrap_or_default();
        let response =
            Message::from_vec(datagram).map_err(|err| ProbeError::Decode { source: err })?;
        if response.id() == id && response.message_type() == MessageType::Response {
            return Ok((response, start.elapsed()));
        }
        debug!(
            "Discarding stray datagram from {} (id {}, expected {}).",
            server,
            response.id(),
            id
        );
    }
}

async fn exchange_tcp(
    server: SocketAddr,
    payload: &[u8],
    id: u16,
) -> Result<(Message, std::time::Duration), ProbeError> {
    let mut stream = TcpStream::connect(server)
        .await
        .map_err(|err| io_error("connect tcp stream", err))?;
    let length = u16::try_from(payload.len()).map_err(|_err| ProbeError::MessageTooLarge {
        len: payload.len(),
    })?;
    let mut frame = Vec::with_capacity(payload.len().saturating_add(TCP_LENGTH_PREFIX));
    frame.extend_from_slice(&length.to_be_bytes());
    frame.extend_from_slice(payload);

    let start = Instant::now();
    stream
        .write_all(&frame)
        .await
        .map_err(|err| io_error("send query", err))?;

    let mut length_prefix = [0_u8; TCP_LENGTH_PREFIX];
    stream
        .read_exact(&mut length_prefix)
        .await
        .map_err(|err| io_error("read response length", err))?;
    let response_len = usize::from(u16::from_be_bytes(length_prefix));
    let mut body = vec![0_u8; response_len];
    stream
        .read_exact(&mut body)
        .await
        .map_err(|err| io_error("read response", err))?;
    let rtt = start.elapsed();

    let response = Message::from_vec(&body).map_err(|err| ProbeError::Decode { source: err })?;
    if response.id() != id {
        return Err(ProbeError::Other {
            message: format!("response id {} does not match query id {}", response.id(), id),
        });
    }
    Ok((response, rtt))
}

fn io_error(context: &'static str, source: std::io::Error) -> ProbeError {
    ProbeError::Io { context, source }
}

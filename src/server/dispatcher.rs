//! # Dispatcher de Requests
//! src/server/dispatcher.rs
//!
//! Atiende una conexión completa dentro de un worker:
//!
//! ```text
//! read ─▶ parse ─▶ validar ─▶ store.load ─▶ encode ─▶ write ─▶ close
//!            │         │            │           │
//!            └─────────┴────────────┴───────────┴──▶ 400 Bad Request
//! ```
//!
//! Ningún fallo de un request llega a ser un panic ni cierra el proceso:
//! todo lo que no se puede servir se responde con `400` sin body. El stream
//! se consume por valor, así que se cierra exactamente una vez al salir de
//! [`Dispatcher::serve`], sea cual sea el camino.

use crate::config::Config;
use crate::error::ServeError;
use crate::http::{HttpRequest, KnownHeader, Method, Response, StatusCode};
use crate::store::{content_type_for, FileStore};
use log::{debug, error, warn};
use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::Arc;
use std::time::Duration;

/// Bytes que se descartan como máximo tras rechazar un request demasiado grande
const DRAIN_LIMIT: usize = 64 * 1024;

/// Espera máxima por el resto de un request rechazado
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Conexión que el dispatcher puede atender
pub trait Connection: Read + Write {
    /// Cierra la mitad de escritura; las lecturas siguientes esperan como
    /// máximo `DRAIN_TIMEOUT`
    fn half_close(&mut self) -> io::Result<()>;
}

impl Connection for TcpStream {
    fn half_close(&mut self) -> io::Result<()> {
        self.shutdown(Shutdown::Write)?;
        self.set_read_timeout(Some(DRAIN_TIMEOUT))
    }
}

/// Límites por request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Bytes máximos que se aceptan en la lectura del request
    pub max_request_bytes: usize,
    /// Bytes máximos de la respuesta codificada
    pub max_response_bytes: usize,
    /// Headers máximos por request
    pub max_headers: usize,
}

impl Limits {
    /// Crea los límites desde el Config principal
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_request_bytes: config.max_request_bytes,
            max_response_bytes: config.max_response_bytes,
            max_headers: config.max_headers,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Convierte bytes de request en bytes de respuesta
pub struct Dispatcher {
    store: Arc<dyn FileStore>,
    limits: Limits,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn FileStore>, limits: Limits) -> Self {
        Self { store, limits }
    }

    /// Atiende una conexión y la cierra
    ///
    /// # Errores
    ///
    /// Solo las fallas de E/S del socket se propagan; todo lo demás ya fue
    /// respondido con un `400`.
    pub fn serve<S: Connection>(&self, mut stream: S) -> Result<(), ServeError> {
        let request_bytes = match self.receive(&mut stream) {
            Ok(bytes) => bytes,
            Err(e) if e.is_io() => return Err(e),
            Err(e) => {
                warn!("400: {}", e);
                stream.write_all(&Response::bad_request().to_bytes())?;
                stream.flush()?;

                // Cerrar con bytes sin leer manda un RST que puede borrar el 400
                stream.half_close()?;
                let discarded = drain(&mut stream, DRAIN_LIMIT);
                debug!("   {} bytes descartados", discarded);
                return Ok(());
            }
        };

        if request_bytes.is_empty() {
            debug!("conexión cerrada sin datos");
            return Ok(());
        }

        let response = self.respond(&request_bytes);
        stream.write_all(&response)?;
        stream.flush()?;

        Ok(())
    }

    /// Lee el request con una sola lectura, como máximo `max_request_bytes`
    fn receive<S: Read>(&self, stream: &mut S) -> Result<Vec<u8>, ServeError> {
        let limit = self.limits.max_request_bytes;

        // Un byte extra para detectar que el request no cabía
        let mut buffer = vec![0u8; limit + 1];
        let received = stream.read(&mut buffer)?;

        if received > limit {
            return Err(ServeError::RequestTooLarge(limit));
        }

        buffer.truncate(received);
        Ok(buffer)
    }

    /// Decide la respuesta completa para un buffer de request
    ///
    /// Siempre retorna bytes listos para enviar: la respuesta del archivo o
    /// el `400` fijo.
    pub fn respond(&self, request_bytes: &[u8]) -> Vec<u8> {
        let encoded = self
            .build_response(request_bytes)
            .and_then(|response| response.encode_within(self.limits.max_response_bytes));

        match encoded {
            Ok(bytes) => bytes,
            Err(e) => {
                if e.is_io() {
                    error!("400: {}", e);
                } else {
                    warn!("400: {}", e);
                }
                Response::bad_request().to_bytes()
            }
        }
    }

    /// Parsea, valida y carga el archivo pedido
    pub fn build_response(&self, request_bytes: &[u8]) -> Result<Response, ServeError> {
        let request = HttpRequest::parse(request_bytes, self.limits.max_headers);

        if let Some(rejection) = request.rejection() {
            return Err(ServeError::BadRequest(rejection.to_string()));
        }

        let method = Method::lookup(request.method_token()).ok_or_else(|| {
            ServeError::BadRequest(format!(
                "unknown method {:?}",
                String::from_utf8_lossy(request.method_token())
            ))
        })?;

        let path = request.path();
        let (major, minor) = request.version();
        debug!(
            "{} {} HTTP/{}.{}",
            method.as_str(),
            String::from_utf8_lossy(path),
            major,
            minor
        );
        for kind in [KnownHeader::Host, KnownHeader::UserAgent] {
            if let Some(value) = request.headers().find(request.buffer(), kind) {
                debug!("   {:?}: {}", kind, String::from_utf8_lossy(value));
            }
        }

        if method == Method::POST {
            return Err(ServeError::BadRequest("unsupported method POST".to_string()));
        }

        let body = self.store.load(path)?;
        debug!("   {} bytes de {}", body.len(), String::from_utf8_lossy(path));

        let response = Response::new(StatusCode::Ok)
            .with_body_bytes(body)
            .with_header("Content-Type", content_type_for(path));

        if method == Method::HEAD {
            // HEAD responde lo mismo que GET, incluido el 400 por tamaño
            let needed = response.encoded_len();
            if needed > self.limits.max_response_bytes {
                return Err(ServeError::ResponseTooLarge(needed, self.limits.max_response_bytes));
            }
            return Ok(response.without_body());
        }

        Ok(response)
    }
}

/// Lee y descarta hasta `limit` bytes o hasta EOF, error o timeout
fn drain<S: Read>(stream: &mut S, limit: usize) -> usize {
    let mut chunk = [0u8; 4096];
    let mut discarded = 0;

    while discarded < limit {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => discarded += n,
        }
    }

    discarded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Store en memoria
    struct MemoryStore(HashMap<&'static [u8], Vec<u8>>);

    impl FileStore for MemoryStore {
        fn load(&self, path: &[u8]) -> Result<Vec<u8>, ServeError> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| ServeError::NotFound(String::from_utf8_lossy(path).into_owned()))
        }
    }

    fn dispatcher_with(limits: Limits) -> Dispatcher {
        let mut files: HashMap<&'static [u8], Vec<u8>> = HashMap::new();
        files.insert(b"/", b"<h1>home</h1>".to_vec());
        files.insert(b"/favicon.ico", vec![0, 0, 1, 0]);
        files.insert(b"/big.txt", vec![b'x'; 4096]);
        Dispatcher::new(Arc::new(MemoryStore(files)), limits)
    }

    fn dispatcher() -> Dispatcher {
        dispatcher_with(Limits::default())
    }

    /// Stream en memoria que cuenta cuántas veces se cerró
    struct FakeStream {
        input: io::Cursor<Vec<u8>>,
        output: Arc<Mutex<Vec<u8>>>,
        closes: Arc<AtomicUsize>,
        fail_read: bool,
        fail_write: bool,
        half_closed: Arc<AtomicBool>,
        unread: Arc<AtomicUsize>,
    }

    impl FakeStream {
        fn new(input: &[u8]) -> (Self, Arc<Mutex<Vec<u8>>>, Arc<AtomicUsize>) {
            let output = Arc::new(Mutex::new(Vec::new()));
            let closes = Arc::new(AtomicUsize::new(0));
            let stream = Self {
                input: io::Cursor::new(input.to_vec()),
                output: Arc::clone(&output),
                closes: Arc::clone(&closes),
                fail_read: false,
                fail_write: false,
                half_closed: Arc::new(AtomicBool::new(false)),
                unread: Arc::new(AtomicUsize::new(0)),
            };
            (stream, output, closes)
        }

        /// Si se cerró la escritura, y cuántos bytes quedaron sin leer al cerrar
        fn shutdown_state(&self) -> (Arc<AtomicBool>, Arc<AtomicUsize>) {
            (Arc::clone(&self.half_closed), Arc::clone(&self.unread))
        }
    }

    impl Connection for FakeStream {
        fn half_close(&mut self) -> io::Result<()> {
            self.half_closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    impl Read for FakeStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.fail_read {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
            }
            self.input.read(buf)
        }
    }

    impl Write for FakeStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.fail_write {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"));
            }
            self.output.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for FakeStream {
        fn drop(&mut self) {
            let unread = self.input.get_ref().len() - self.input.position() as usize;
            self.unread.store(unread, Ordering::SeqCst);
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    const BAD_REQUEST: &[u8] = b"HTTP/1.0 400 Bad Request\r\n\r\n";

    fn serve(input: &[u8]) -> (Result<(), ServeError>, Vec<u8>, usize) {
        let (stream, output, closes) = FakeStream::new(input);
        let result = dispatcher().serve(stream);
        let written = output.lock().unwrap().clone();
        (result, written, closes.load(Ordering::SeqCst))
    }

    #[test]
    fn test_index_served() {
        let (result, written, closes) = serve(b"GET / HTTP/1.0\r\n\r\n");

        assert!(result.is_ok());
        assert_eq!(
            written,
            b"HTTP/1.0 200 OK\r\nContent-Length: 13\r\nContent-Type: text/html; charset=utf-8\r\n\r\n<h1>home</h1>"
        );
        assert_eq!(closes, 1);
    }

    #[test]
    fn test_favicon_content_type() {
        let response = dispatcher().build_response(b"GET /favicon.ico HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(response.header("Content-Type"), Some("image/x-icon"));
        assert_eq!(response.body(), &[0u8, 0, 1, 0]);
    }

    #[test]
    fn test_simple_request_served() {
        let response = dispatcher().build_response(b"GET /\r\n").unwrap();
        assert_eq!(response.status(), StatusCode::Ok);
    }

    #[test]
    fn test_head_has_no_body() {
        let response = dispatcher().build_response(b"HEAD / HTTP/1.0\r\n\r\n").unwrap();

        assert_eq!(response.header("Content-Length"), Some("13"));
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_query_ignored_for_lookup() {
        let response = dispatcher().build_response(b"GET /?v=2 HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(response.body(), b"<h1>home</h1>");
    }

    #[test]
    fn test_not_found_is_400_and_closes_once() {
        let (result, written, closes) = serve(b"GET /missing.html HTTP/1.0\r\n\r\n");

        assert!(result.is_ok());
        assert_eq!(written, BAD_REQUEST);
        assert_eq!(closes, 1);
    }

    #[test]
    fn test_malformed_request_is_400_and_closes_once() {
        let (result, written, closes) = serve(b"GET http://x/ HTTP/1.0\r\n\r\n");

        assert!(result.is_ok());
        assert_eq!(written, BAD_REQUEST);
        assert_eq!(closes, 1);
    }

    #[test]
    fn test_bad_header_is_400() {
        let (_, written, _) = serve(b"GET / HTTP/1.0\r\nBadHeader\r\n\r\n");
        assert_eq!(written, BAD_REQUEST);
    }

    #[test]
    fn test_method_validation() {
        let d = dispatcher();
        assert!(matches!(
            d.build_response(b"POST / HTTP/1.0\r\n\r\n"),
            Err(ServeError::BadRequest(_))
        ));
        assert!(matches!(
            d.build_response(b"DELETE / HTTP/1.0\r\n\r\n"),
            Err(ServeError::BadRequest(_))
        ));
        assert!(matches!(
            d.build_response(b"get / HTTP/1.0\r\n\r\n"),
            Err(ServeError::BadRequest(_))
        ));
    }

    #[test]
    fn test_too_many_headers_is_400() {
        let d = dispatcher_with(Limits {
            max_headers: 1,
            ..Limits::default()
        });
        assert!(d.build_response(b"GET / HTTP/1.0\r\nA: 1\r\n\r\n").is_ok());
        assert_eq!(d.respond(b"GET / HTTP/1.0\r\nA: 1\r\nB: 2\r\n\r\n"), BAD_REQUEST);
    }

    #[test]
    fn test_oversized_request_is_400_and_closes_once() {
        let d = dispatcher_with(Limits {
            max_request_bytes: 32,
            ..Limits::default()
        });
        let mut raw = b"GET / HTTP/1.0\r\n".to_vec();
        raw.extend_from_slice(&[b'a'; 64]);

        let (stream, output, closes) = FakeStream::new(&raw);
        let (half_closed, unread) = stream.shutdown_state();
        assert!(d.serve(stream).is_ok());
        assert_eq!(*output.lock().unwrap(), BAD_REQUEST);
        assert_eq!(closes.load(Ordering::SeqCst), 1);

        // Se cerró la escritura y se leyó el resto antes de cerrar
        assert!(half_closed.load(Ordering::SeqCst));
        assert_eq!(unread.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drain_stops_at_limit() {
        let mut input = io::Cursor::new(vec![b'x'; 10_000]);
        let discarded = drain(&mut input, 5_000);

        assert!(discarded >= 5_000);
        assert!(discarded < 10_000);
    }

    #[test]
    fn test_valid_request_does_not_half_close() {
        let (stream, _, _) = FakeStream::new(b"GET / HTTP/1.0\r\n\r\n");
        let (half_closed, _) = stream.shutdown_state();

        dispatcher().serve(stream).unwrap();
        assert!(!half_closed.load(Ordering::SeqCst));
    }

    #[test]
    fn test_request_exactly_at_limit_is_parsed() {
        let raw = b"GET / HTTP/1.0\r\n\r\n";
        let d = dispatcher_with(Limits {
            max_request_bytes: raw.len(),
            ..Limits::default()
        });

        let (stream, output, _) = FakeStream::new(raw);
        d.serve(stream).unwrap();
        assert!(output.lock().unwrap().starts_with(b"HTTP/1.0 200 OK"));
    }

    #[test]
    fn test_oversized_response_is_400() {
        let d = dispatcher_with(Limits {
            max_response_bytes: 1024,
            ..Limits::default()
        });
        assert_eq!(d.respond(b"GET /big.txt HTTP/1.0\r\n\r\n"), BAD_REQUEST);
        // el índice sí cabe
        assert!(d.respond(b"GET / HTTP/1.0\r\n\r\n").starts_with(b"HTTP/1.0 200 OK"));
    }

    #[test]
    fn test_head_matches_get_status_for_oversized_file() {
        let d = dispatcher_with(Limits {
            max_response_bytes: 1024,
            ..Limits::default()
        });

        assert_eq!(d.respond(b"HEAD /big.txt HTTP/1.0\r\n\r\n"), BAD_REQUEST);
        assert!(matches!(
            d.build_response(b"HEAD /big.txt HTTP/1.0\r\n\r\n"),
            Err(ServeError::ResponseTooLarge(_, 1024))
        ));
        assert!(d.respond(b"HEAD / HTTP/1.0\r\n\r\n").starts_with(b"HTTP/1.0 200 OK"));
    }

    #[test]
    fn test_read_error_propagates_and_closes_once() {
        let (mut stream, output, closes) = FakeStream::new(b"");
        stream.fail_read = true;

        let result = dispatcher().serve(stream);
        assert!(matches!(result, Err(ServeError::Io(_))));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
        // Un socket que ya falló no recibe respuesta
        assert!(output.lock().unwrap().is_empty());
    }

    #[test]
    fn test_write_error_propagates_and_closes_once() {
        let (mut stream, _, closes) = FakeStream::new(b"GET / HTTP/1.0\r\n\r\n");
        stream.fail_write = true;

        let result = dispatcher().serve(stream);
        assert!(matches!(result, Err(ServeError::Io(_))));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_connection_writes_nothing() {
        let (result, written, closes) = serve(b"");

        assert!(result.is_ok());
        assert!(written.is_empty());
        assert_eq!(closes, 1);
    }

    #[test]
    fn test_limits_from_config() {
        let mut config = Config::default();
        config.max_headers = 7;
        assert_eq!(Limits::from_config(&config).max_headers, 7);
    }
}

use serde::{de::DeserializeOwned, Serialize};

pub(crate) mod covers;
pub(crate) mod list_service;
pub(crate) mod open_library;

pub trait Client
where
    Self: Default,
{
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned;

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, Error>;

    fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize,
        T: DeserializeOwned;
}

impl Client for reqwest::blocking::Client {
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.get(url)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))
            .and_then(|r| r.json().map_err(|e| Error::wrap(ErrorKind::Deserialize, e)))
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, Error> {
        let resp = self
            .get(url)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))?;
        let bytes = resp.bytes().map_err(|e| Error::wrap(ErrorKind::IO, e))?;

        if bytes.is_empty() {
            Err(Error::new(ErrorKind::NoValue, "Response body is empty"))
        } else {
            Ok(bytes.to_vec())
        }
    }

    fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.post(url)
            .json(body)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))
            .and_then(|r| r.json().map_err(|e| Error::wrap(ErrorKind::Deserialize, e)))
    }
}

#[cfg(test)]
pub(crate) use test::{
    assert_url, impl_text_producer, take_body, take_urls, MockClient, NetworkErrorProducer,
    Producer, URL_SINK,
};

use crate::{Error, ErrorKind};

#[cfg(test)]
mod test {

    use super::*;

    thread_local! {
        pub(crate) static URL_SINK: std::cell::RefCell<Vec<String>> =
            std::cell::RefCell::new(Vec::new());
        pub(crate) static BODY_SINK: std::cell::RefCell<Option<serde_json::Value>> =
            std::cell::RefCell::new(None);
    }

    /// Drains and returns every URL requested through a [`MockClient`] on this thread.
    ///
    /// Tests that assert how many requests a function issues should call this once at
    /// the start to clear any URLs left behind by earlier tests on the same thread.
    pub(crate) fn take_urls() -> Vec<String> {
        URL_SINK.with(|sink| sink.borrow_mut().drain(..).collect())
    }

    /// Takes the JSON body of the last POST made through a [`MockClient`] on this thread.
    pub(crate) fn take_body() -> Option<serde_json::Value> {
        BODY_SINK.with(|sink| sink.borrow_mut().take())
    }

    /// Asserts that the expected URL is the same as the last one provided to the
    /// [`MockClient`].
    ///
    /// The [`MockClient`] appends every URL string passed to it to the static thread
    /// local `URL_SINK`, this allows for asserting that implementing functions or
    /// methods are parsing the correct URL.
    macro_rules! assert_url {
        ($expected: expr) => {
            assert_url!($expected, "");
        };
        ($expected: expr, $($arg: tt)+) => {
            let url = crate::api::URL_SINK
                .with(|sink| sink.borrow().last().cloned().unwrap_or_default());
            assert_eq!($expected, url, $($arg)+);
        };
    }

    pub(crate) trait Producer<T>
    where
        Self: Default,
    {
        fn produce() -> Result<T, Error>;
    }

    #[derive(Default)]
    pub(crate) struct MockClient<P: Producer<String> = EmptyTextProducer> {
        _producer: std::marker::PhantomData<P>,
    }

    impl<P: Producer<String>> MockClient<P> {
        fn record(url: &str) {
            URL_SINK.with(|sink| sink.borrow_mut().push(url.to_owned()));
        }
    }

    impl<P: Producer<String>> Client for MockClient<P> {
        fn get_json<T>(&self, url: &str) -> Result<T, Error>
        where
            T: DeserializeOwned,
        {
            Self::record(url);
            P::produce().and_then(|json| {
                serde_json::from_str(&json).map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
            })
        }

        fn get_bytes(&self, url: &str) -> Result<Vec<u8>, Error> {
            Self::record(url);
            P::produce().map(String::into_bytes)
        }

        fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, Error>
        where
            B: Serialize,
            T: DeserializeOwned,
        {
            Self::record(url);
            let body = serde_json::to_value(body)
                .map_err(|e| Error::wrap(ErrorKind::Deserialize, e))?;
            BODY_SINK.with(|sink| *sink.borrow_mut() = Some(body));
            P::produce().and_then(|json| {
                serde_json::from_str(&json).map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
            })
        }
    }

    macro_rules! impl_text_producer {
        ($($producer:ident => $exp:expr,)*) => {
            $(
                #[derive(Default)]
                pub(crate) struct $producer;

                impl crate::api::Producer<String> for $producer {
                    fn produce() -> Result<String, crate::Error> {
                        $exp
                    }
                }
            )*
        };
    }
    impl_text_producer! {
        EmptyTextProducer => Ok("".to_owned()),
        NetworkErrorProducer => Err(Error::new(ErrorKind::IO, "Network error")),
    }

    pub(crate) use assert_url;
    pub(crate) use impl_text_producer;
}

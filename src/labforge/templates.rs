// Static template text for the generated Dockerfile. The master template is
// the document skeleton; the per-kernel fragments are appended in selection
// order via the `kernel_installs` list.

pub static TEMPLATE_DOCKERFILE: &str = r#"
FROM ubuntu:{{ubuntu_version}}
MAINTAINER Ilya Portnov <portnov@bk.ru>

RUN apt-get update

{{#each environment}}ENV {{this.name}} {{{this.value}}}
{{/each}}RUN DEBIAN_FRONTEND=noninteractive apt-get install -y --no-install-recommends {{{apt_packages}}}


RUN python3 -m venv /python && \
  /python/bin/pip3 install notebook && \
  /python/bin/pip3 install jupyterlab

ENV PATH="/python/bin:$PATH"

# Install Tini
ENV TINI_VERSION v0.19.0
ADD https://github.com/krallin/tini/releases/download/${TINI_VERSION}/tini /tini
ADD https://github.com/krallin/tini/releases/download/${TINI_VERSION}/tini.asc /tini.asc
RUN gpg --batch --keyserver hkp://keyserver.ubuntu.com:80 --recv-keys 595E85A6B1B4779EA4DAAEC70B588DFF0527A9B7 \
 && gpg --batch --verify /tini.asc /tini \
 && chmod +x /tini

# Default notebook profile.
RUN mkdir -p -m 700 /root/.jupyter/ && \
    echo "c.NotebookApp.ip = '*'" >> /root/.jupyter/jupyter_notebook_config.py

WORKDIR /usr/src/
{{#if need_lisp}}
ENV SBCL_VERSION 2.5.0

# Download & build sbcl
RUN cd /usr/src/ && \
  wget http://prdownloads.sourceforge.net/sbcl/sbcl-${SBCL_VERSION}-source.tar.bz2?download -O sbcl.tar.bz2 && \
  tar xf sbcl.tar.bz2 && \
  rm sbcl.tar.bz2 && \
  cd sbcl-${SBCL_VERSION} && \
  bash make.sh && \
  bash install.sh

ENV SBCL_HOME /usr/local/lib/sbcl
{{/if}}{{#each kernel_installs}}{{{this}}}{{/each}}
RUN /python/bin/pip3 install jupyterlab-theme-solarized-dark jupyterlab-gruvbox-dark

VOLUME /notebooks
VOLUME /root/.jupyter
WORKDIR /notebooks

EXPOSE 8888

ENTRYPOINT ["/tini", "--"]
CMD ["jupyter", "lab", "--no-browser", "--allow-root"]
"#;

pub static PYTHON_INSTALL: &str = r#"RUN /python/bin/pip3 install ipykernel && \
  /python/bin/python3 -m ipykernel.kernelspec && \
  /python/bin/pip3 install ipywidgets && \
  /python/bin/pip3 install --no-cache-dir widgetsnbextension && \
  /python/bin/pip3 install --no-cache-dir scipy matplotlib
"#;

pub static OCTAVE_INSTALL: &str = "RUN /python/bin/pip3 install octave_kernel\n";

pub static FRICAS_INSTALL: &str = r#"
ADD hsbcl.lisp /usr/src/hsbcl.lisp

RUN sbcl --eval '(load "/usr/src/hsbcl.lisp")' --quit

# download & build fricas
RUN cd /usr/src/ && \
  git clone https://github.com/fricas/fricas.git && \
  cd fricas/ && \
  ./build-setup.sh && \
  ./configure --with-lisp=/usr/local/bin/hsbcl --enable-gmp && \
  make -j4 && \
  make install

RUN . /python/bin/activate && \
 	/python/bin/pip3 install wheel && \
 	/python/bin/pip3 install jupyter && \
 	/python/bin/pip3 install requests && \
    /python/bin/pip3 install jfricas
"#;

pub static MAXIMA_INSTALL: &str = r#"
# install maxima
RUN cd /usr/src/ && \
  wget "https://altushost-swe.dl.sourceforge.net/project/maxima/Maxima-source/${MAXIMA_VERSION}-source/maxima-${MAXIMA_VERSION}.tar.gz?viasf=1" -O maxima.tar.gz && \
  tar xf maxima.tar.gz && \
  rm maxima.tar.gz && \
  cd maxima-${MAXIMA_VERSION}/ && \
  ./configure && \
  make -j4 && \
  make install

ADD install.maxima /usr/src

RUN git clone https://github.com/robert-dodier/maxima-jupyter && \
	cd maxima-jupyter/ && \
  maxima -b /usr/src/install.maxima
"#;

pub static HASKELL_INSTALL: &str = r#"
RUN stack upgrade && \
    mkdir -p /root/.stack/global-project && \
    echo -e 'packages: []\nsnapshot: lts-22-10' > /root/.stack/global-project/stack.yaml && \
    git clone https://github.com/gibiansky/IHaskell && \
    cd IHaskell && \
    /python/bin/pip3 install -r requirements.txt && \
    stack install --fast && \
    ~/.local/bin/ihaskell install --stack
"#;

pub static JULIA_INSTALL: &str = r#"
# install Julia
RUN cd /opt && \
  wget https://julialang-s3.julialang.org/bin/linux/x64/${JULIA_MAJOR_VERSION}/julia-${JULIA_VERSION}-linux-x86_64.tar.gz -O julia.tar.gz && \
  tar xf julia.tar.gz && \
  ln -s /opt/julia-${JULIA_VERSION}/bin/julia /usr/local/bin && \
  rm julia.tar.gz

# install Julia for jupyter
ADD install.julia /usr/src/install.julia
RUN julia /usr/src/install.julia
"#;

pub static R_INSTALL: &str = r#"
# install R for jupyter (IRkernel)
ADD install.R /usr/src/install.R
RUN R -f /usr/src/install.R
"#;

pub static JAVA_INSTALL: &str = r#"
RUN wget https://github.com/allen-ball/ganymede/releases/download/v2.1.2.20230910/ganymede-2.1.2.20230910.jar -O ganymede.jar && \
        java -jar ganymede.jar -i
"#;
